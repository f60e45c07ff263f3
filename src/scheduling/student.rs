//! # Per-student scheduling
//!
//! Chooses, for each course a student is registered for, one of the lecture
//! offerings already placed in the master schedule. One gene per course holds
//! the index of the chosen offering.

use std::collections::HashSet;

use tracing::{info, warn};

use super::model::{CourseId, Registration, ScheduledLecture, StudentId};
use super::{evolve, ScheduleOutcome};
use crate::{
    chromosome::{Chromosome, ChromosomeEncoding, GeneBound, GeneSpace},
    constraints::{PenaltyEvaluator, Violation, ViolationKind},
    error::{OptionExt, Result, TimetableError},
    evolution::{EvolutionOptions, GenerationObserver, TracingObserver},
};

/// A student's registered courses and the offerings available for each.
#[derive(Debug, Clone)]
pub struct StudentProblem {
    student_id: StudentId,
    courses: Vec<CourseId>,
    /// `offerings[i]` are the master schedule rows of `courses[i]`, in master order.
    offerings: Vec<Vec<ScheduledLecture>>,
    missing_courses: Vec<CourseId>,
}

impl StudentProblem {
    /// Collects the student's courses, in registration order, and their offerings.
    ///
    /// A registered course without any offering is kept and reported through
    /// [`missing_courses`](Self::missing_courses) and a `warn!` event.
    ///
    /// # Errors
    ///
    /// Returns `TimetableError::InputValidation` when the student has no registration.
    pub fn new(
        student_id: impl Into<StudentId>,
        master: &[ScheduledLecture],
        registrations: &[Registration],
    ) -> Result<Self> {
        let student_id = student_id.into();

        let mut courses: Vec<CourseId> = Vec::new();
        for registration in registrations.iter().filter(|r| r.student_id == student_id) {
            if !courses.contains(&registration.course_id) {
                courses.push(registration.course_id.clone());
            }
        }

        if courses.is_empty() {
            return Err(TimetableError::InputValidation(format!(
                "No registration data found for student_id: {}",
                student_id
            )));
        }

        let offerings: Vec<Vec<ScheduledLecture>> = courses
            .iter()
            .map(|course| {
                master
                    .iter()
                    .filter(|lecture| &lecture.course_id == course)
                    .cloned()
                    .collect()
            })
            .collect();

        let missing_courses: Vec<CourseId> = courses
            .iter()
            .zip(&offerings)
            .filter(|(_, offered)| offered.is_empty())
            .map(|(course, _)| course.clone())
            .collect();

        for course in &missing_courses {
            warn!(
                student = %student_id,
                course = %course,
                "registered course has no lectures in the master schedule"
            );
        }

        info!(
            student = %student_id,
            courses = courses.len(),
            offerings = offerings.iter().map(Vec::len).sum::<usize>(),
            "student problem prepared"
        );

        Ok(Self {
            student_id,
            courses,
            offerings,
            missing_courses,
        })
    }

    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    pub fn courses(&self) -> &[CourseId] {
        &self.courses
    }

    /// Offerings of the `course`-th registered course, `None` past the last course.
    pub fn offerings(&self, course: usize) -> Option<&[ScheduledLecture]> {
        self.offerings.get(course).map(Vec::as_slice)
    }

    /// Registered courses that the master schedule does not offer.
    pub fn missing_courses(&self) -> &[CourseId] {
        &self.missing_courses
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selection {
    pub course: usize,
    pub offering: usize,
}

/// A decoded student chromosome: one selection per registered course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentSchedule {
    selections: Vec<Selection>,
}

impl StudentSchedule {
    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Resolves the selections into the chosen master schedule rows.
    ///
    /// # Errors
    ///
    /// Returns `TimetableError::Configuration` if a selection has no
    /// counterpart in `problem`, i.e. the schedule was decoded for another student.
    pub fn to_lectures(&self, problem: &StudentProblem) -> Result<Vec<ScheduledLecture>> {
        self.selections
            .iter()
            .map(|s| {
                problem
                    .offerings(s.course)
                    .and_then(|offered| offered.get(s.offering))
                    .cloned()
                    .ok_or_else_timetable(|| {
                        TimetableError::Configuration(format!(
                            "Selection of offering {} for course {} does not fit student '{}'",
                            s.offering, s.course, problem.student_id
                        ))
                    })
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct StudentEncoding<'a> {
    problem: &'a StudentProblem,
    gene_space: GeneSpace,
}

impl<'a> StudentEncoding<'a> {
    /// # Errors
    ///
    /// Returns `TimetableError::Configuration` naming the first registered
    /// course that has no offering to choose from.
    pub fn new(problem: &'a StudentProblem) -> Result<Self> {
        let bounds = problem
            .courses
            .iter()
            .zip(&problem.offerings)
            .map(|(course, offered)| {
                if offered.is_empty() {
                    return Err(TimetableError::Configuration(format!(
                        "Course '{}' of student '{}' has no offering in the master schedule",
                        course, problem.student_id
                    )));
                }
                GeneBound::upto(offered.len())
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            problem,
            gene_space: GeneSpace::new(bounds)?,
        })
    }

    pub fn problem(&self) -> &'a StudentProblem {
        self.problem
    }
}

impl ChromosomeEncoding for StudentEncoding<'_> {
    type Decoded = StudentSchedule;

    fn gene_space(&self) -> &GeneSpace {
        &self.gene_space
    }

    fn decode(&self, chromosome: &Chromosome) -> Result<StudentSchedule> {
        self.gene_space.check(chromosome)?;

        let selections = chromosome
            .genes()
            .iter()
            .enumerate()
            .map(|(course, &offering)| Selection { course, offering })
            .collect();

        Ok(StudentSchedule { selections })
    }
}

/// Time conflicts between chosen offerings plus one soft penalty per study day.
#[derive(Debug, Clone, Copy)]
pub struct StudentEvaluator<'a> {
    problem: &'a StudentProblem,
}

impl<'a> StudentEvaluator<'a> {
    pub fn new(problem: &'a StudentProblem) -> Self {
        Self { problem }
    }
}

impl PenaltyEvaluator<StudentSchedule> for StudentEvaluator<'_> {
    fn scan<F>(&self, schedule: &StudentSchedule, mut on_violation: F)
    where
        F: FnMut(Violation),
    {
        let mut booked = HashSet::with_capacity(schedule.len());
        let mut days = HashSet::new();

        for (position, selection) in schedule.selections.iter().enumerate() {
            let timeslot = self.problem.offerings[selection.course][selection.offering].timeslot;

            if !booked.insert(timeslot) {
                on_violation(Violation::new(ViolationKind::StudentTimeConflict, position));
            }

            // Reported at the first entry on each day
            if days.insert(timeslot.day()) {
                on_violation(Violation::new(ViolationKind::StudyDay, position));
            }
        }
    }
}

/// Runs the per-student search for one student.
#[derive(Debug, Clone)]
pub struct StudentScheduler {
    problem: StudentProblem,
    options: EvolutionOptions,
}

impl StudentScheduler {
    /// Fails before any generation runs if a registered course cannot be scheduled.
    pub fn new(problem: StudentProblem, options: EvolutionOptions) -> Result<Self> {
        options.validate()?;
        StudentEncoding::new(&problem)?;
        Ok(Self { problem, options })
    }

    pub fn problem(&self) -> &StudentProblem {
        &self.problem
    }

    pub fn run(&self) -> Result<ScheduleOutcome> {
        self.run_with_observer(&mut TracingObserver::with_label(self.problem.student_id.clone()))
    }

    pub fn run_with_observer<O>(&self, observer: &mut O) -> Result<ScheduleOutcome>
    where
        O: GenerationObserver + ?Sized,
    {
        info!(
            student = %self.problem.student_id,
            courses = self.problem.courses.len(),
            "starting student schedule evolution"
        );

        let encoding = StudentEncoding::new(&self.problem)?;
        let evaluator = StudentEvaluator::new(&self.problem);
        let (schedule, outcome) = evolve(encoding, evaluator, &self.options, observer)?;
        let outcome = outcome.with_schedule(schedule.to_lectures(&self.problem)?);

        info!(
            student = %self.problem.student_id,
            penalty = outcome.penalty,
            "student schedule evolution finished"
        );
        Ok(outcome)
    }
}
