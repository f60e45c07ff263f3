//! # Scheduling
//!
//! The two scheduler variants built on top of the evolution engine:
//!
//! - [`institution`] places every lecture-hour into a room and timeslot.
//! - [`student`] picks one offering per registered course out of a master schedule.
//!
//! Both report a [`ScheduleOutcome`] for the best chromosome found.

pub mod institution;
pub mod model;
pub mod student;

pub use institution::{InstitutionProblem, InstitutionScheduler};
pub use model::{
    Course, Registration, ScheduledLecture, TeacherAvailabilityWindow, TeacherCourse, Timeslot,
};
pub use student::{StudentProblem, StudentScheduler};

use crate::{
    chromosome::ChromosomeEncoding,
    constraints::{PenaltyEvaluator, Violation},
    error::Result,
    evolution::{fitness_from_penalty, EvolutionEngine, EvolutionOptions, GenerationObserver, PenaltyChallenge},
};

/// The best schedule of a run, with its score and the violations it still has.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleOutcome {
    pub schedule: Vec<ScheduledLecture>,
    pub penalty: u64,
    pub fitness: f64,
    pub violations: Vec<Violation>,
    pub generations_completed: usize,
    /// Best-so-far fitness after each generation; never decreasing.
    pub best_fitness_history: Vec<f64>,
}

impl ScheduleOutcome {
    /// True when no constraint is violated.
    pub fn is_feasible(&self) -> bool {
        self.penalty == 0
    }

    pub(crate) fn with_schedule(mut self, schedule: Vec<ScheduledLecture>) -> Self {
        self.schedule = schedule;
        self
    }
}

/// Evolves a chromosome for `encoding` and decodes the best one.
///
/// The returned outcome has an empty schedule; callers resolve the decoded
/// value into lecture records.
pub(crate) fn evolve<E, V, O>(
    encoding: E,
    evaluator: V,
    options: &EvolutionOptions,
    observer: &mut O,
) -> Result<(E::Decoded, ScheduleOutcome)>
where
    E: ChromosomeEncoding,
    V: PenaltyEvaluator<E::Decoded>,
    O: GenerationObserver + ?Sized,
{
    let gene_space = encoding.gene_space().clone();
    let challenge = PenaltyChallenge::new(encoding, evaluator);

    let result = EvolutionEngine::new(&challenge, gene_space, options.clone())?.run(observer)?;

    let decoded = challenge.encoding().decode(&result.chromosome)?;
    let penalty = challenge.evaluator().penalty(&decoded);
    let violations = challenge.evaluator().violations(&decoded);

    let outcome = ScheduleOutcome {
        schedule: Vec::new(),
        penalty,
        fitness: fitness_from_penalty(penalty),
        violations,
        generations_completed: result.generations_completed,
        best_fitness_history: result.best_fitness_history,
    };

    Ok((decoded, outcome))
}
