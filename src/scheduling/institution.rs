//! # Institution-wide scheduling
//!
//! Places every lecture-hour of every teacher-course pair into a classroom and
//! a timeslot. Each lecture-hour owns two genes: a room index followed by a
//! timeslot index.
//!
//! ## Example
//!
//! ```rust
//! use chrono::Weekday;
//! use timetable_ga::evolution::{EvolutionOptions, NoopObserver};
//! use timetable_ga::scheduling::institution::{InstitutionProblem, InstitutionScheduler};
//! use timetable_ga::scheduling::model::{Course, TeacherAvailabilityWindow, TeacherCourse};
//!
//! let problem = InstitutionProblem::new(
//!     &[Course::new("CS101", 2)],
//!     vec!["R1".to_string()],
//!     &[TeacherCourse::new("T1", "CS101")],
//!     vec![TeacherAvailabilityWindow::parse("T1", Weekday::Sun, "08:00", "17:00")?],
//! )?;
//!
//! let mut options = EvolutionOptions::new(100, 4, 20, 10.0);
//! options.set_seed(Some(1));
//!
//! let outcome = InstitutionScheduler::new(problem, options)?.run_with_observer(&mut NoopObserver)?;
//! assert_eq!(outcome.schedule.len(), 2);
//! # Ok::<(), timetable_ga::error::TimetableError>(())
//! ```

use std::collections::{HashMap, HashSet};

use chrono::{NaiveTime, Weekday};
use tracing::{debug, info};

use super::model::{
    Course, LectureRequirement, RoomId, ScheduledLecture, TeacherAvailabilityWindow,
    TeacherCourse, TeacherId, Timeslot,
};
use super::{evolve, ScheduleOutcome};
use crate::{
    chromosome::{Chromosome, ChromosomeEncoding, GeneBound, GeneSpace},
    constraints::{PenaltyEvaluator, Violation, ViolationKind},
    error::{OptionExt, Result, TimetableError},
    evolution::{EvolutionOptions, GenerationObserver, TracingObserver},
};

/// A normalized institution scheduling instance.
///
/// Lecture requirements are expanded in teacher-course order, one entry per
/// lecture-hour, and never change afterwards.
#[derive(Debug, Clone)]
pub struct InstitutionProblem {
    lectures: Vec<LectureRequirement>,
    classrooms: Vec<RoomId>,
    timeslots: Vec<Timeslot>,
    windows: HashMap<(TeacherId, Weekday), Vec<(NaiveTime, NaiveTime)>>,
    teachers: Vec<TeacherId>,
    /// Interned teacher index of every lecture.
    lecture_teacher: Vec<usize>,
    /// `available[teacher * timeslots.len() + slot]`
    available: Vec<bool>,
}

impl InstitutionProblem {
    /// Builds the problem over the 45-slot teaching week.
    ///
    /// # Errors
    ///
    /// - `UnknownReference` if a teacher-course row names an undeclared course.
    /// - `InputValidation` for duplicate courses or classrooms, a course with zero
    ///   lectures per week, or an empty availability window.
    pub fn new(
        courses: &[Course],
        classrooms: Vec<RoomId>,
        teacher_courses: &[TeacherCourse],
        preferences: Vec<TeacherAvailabilityWindow>,
    ) -> Result<Self> {
        let mut lectures_per_week: HashMap<&str, u32> = HashMap::with_capacity(courses.len());
        for course in courses {
            if course.lectures_per_week == 0 {
                return Err(TimetableError::InputValidation(format!(
                    "Course '{}' needs at least one lecture per week",
                    course.course_id
                )));
            }
            if lectures_per_week
                .insert(course.course_id.as_str(), course.lectures_per_week)
                .is_some()
            {
                return Err(TimetableError::InputValidation(format!(
                    "Course '{}' is declared more than once",
                    course.course_id
                )));
            }
        }

        let mut seen_rooms = HashSet::with_capacity(classrooms.len());
        if let Some(room) = classrooms.iter().find(|room| !seen_rooms.insert(room.as_str())) {
            return Err(TimetableError::InputValidation(format!(
                "Classroom '{}' is declared more than once",
                room
            )));
        }

        let mut lectures = Vec::new();
        for row in teacher_courses {
            let count = lectures_per_week
                .get(row.course_id.as_str())
                .copied()
                .ok_or_else(|| TimetableError::UnknownReference {
                    kind: "course",
                    id: row.course_id.clone(),
                })?;

            lectures.extend((0..count).map(|_| LectureRequirement {
                course_id: row.course_id.clone(),
                teacher_id: row.teacher_id.clone(),
            }));
        }

        let mut teachers: Vec<TeacherId> = Vec::new();
        let mut teacher_index: HashMap<&str, usize> = HashMap::new();
        let lecture_teacher: Vec<usize> = lectures
            .iter()
            .map(|lecture| {
                *teacher_index
                    .entry(lecture.teacher_id.as_str())
                    .or_insert_with(|| {
                        teachers.push(lecture.teacher_id.clone());
                        teachers.len() - 1
                    })
            })
            .collect();

        let mut windows: HashMap<(TeacherId, Weekday), Vec<(NaiveTime, NaiveTime)>> =
            HashMap::new();
        for window in preferences {
            window.validate()?;
            if !teacher_index.contains_key(window.teacher_id.as_str()) {
                debug!(teacher = %window.teacher_id, "ignoring availability of a teacher without lectures");
            }
            windows
                .entry((window.teacher_id, window.day))
                .or_default()
                .push((window.preferred_start, window.preferred_end));
        }

        let mut problem = Self {
            lectures,
            classrooms,
            timeslots: Timeslot::teaching_week(),
            windows,
            teachers,
            lecture_teacher,
            available: Vec::new(),
        };
        problem.rebuild_availability();

        info!(
            lectures = problem.lectures.len(),
            classrooms = problem.classrooms.len(),
            timeslots = problem.timeslots.len(),
            "institution problem prepared"
        );

        Ok(problem)
    }

    /// Replaces the timeslot universe, e.g. for an institution with a different grid.
    ///
    /// # Errors
    ///
    /// `Configuration` for an empty list, `InputValidation` for a repeated slot.
    pub fn with_timeslots(mut self, timeslots: Vec<Timeslot>) -> Result<Self> {
        if timeslots.is_empty() {
            return Err(TimetableError::Configuration(
                "Timeslot universe is empty".to_string(),
            ));
        }
        let mut seen = HashSet::with_capacity(timeslots.len());
        if let Some(slot) = timeslots.iter().find(|slot| !seen.insert(**slot)) {
            return Err(TimetableError::InputValidation(format!(
                "Timeslot {} is declared more than once",
                slot
            )));
        }
        self.timeslots = timeslots;
        self.rebuild_availability();
        Ok(self)
    }

    fn rebuild_availability(&mut self) {
        let problem: &Self = self;
        let available = problem
            .teachers
            .iter()
            .flat_map(|teacher| {
                problem
                    .timeslots
                    .iter()
                    .map(move |timeslot| problem.is_available(teacher, timeslot))
            })
            .collect();
        self.available = available;
    }

    /// Whether `timeslot` starts within one of the teacher's windows for that day.
    ///
    /// A teacher without any window on a day is unavailable on that day.
    pub fn is_available(&self, teacher_id: &str, timeslot: &Timeslot) -> bool {
        self.windows
            .get(&(teacher_id.to_string(), timeslot.day()))
            .map_or(false, |windows| {
                windows
                    .iter()
                    .any(|&(start, end)| start <= timeslot.start() && timeslot.start() < end)
            })
    }

    fn is_available_at(&self, teacher: usize, slot: usize) -> bool {
        self.available[teacher * self.timeslots.len() + slot]
    }

    pub fn lectures(&self) -> &[LectureRequirement] {
        &self.lectures
    }

    pub fn classrooms(&self) -> &[RoomId] {
        &self.classrooms
    }

    pub fn timeslots(&self) -> &[Timeslot] {
        &self.timeslots
    }
}

/// One lecture-hour placed by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub lecture: usize,
    pub room: usize,
    pub timeslot: usize,
}

/// A decoded institution chromosome: one placement per lecture-hour, in
/// requirement order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstitutionSchedule {
    placements: Vec<Placement>,
}

impl InstitutionSchedule {
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Resolves the placements into lecture records.
    ///
    /// # Errors
    ///
    /// Returns `TimetableError::Configuration` if a placement refers to a
    /// lecture, room or timeslot that `problem` does not have, i.e. the
    /// schedule was decoded for a different problem.
    pub fn to_lectures(&self, problem: &InstitutionProblem) -> Result<Vec<ScheduledLecture>> {
        self.placements
            .iter()
            .map(|p| {
                let mismatch = || {
                    TimetableError::Configuration(format!(
                        "Placement of lecture {} does not fit this problem",
                        p.lecture
                    ))
                };
                let lecture = problem.lectures.get(p.lecture).ok_or_else_timetable(mismatch)?;
                let room_id = problem.classrooms.get(p.room).ok_or_else_timetable(mismatch)?;
                let timeslot = problem.timeslots.get(p.timeslot).ok_or_else_timetable(mismatch)?;
                Ok(ScheduledLecture {
                    course_id: lecture.course_id.clone(),
                    teacher_id: lecture.teacher_id.clone(),
                    room_id: room_id.clone(),
                    timeslot: *timeslot,
                })
            })
            .collect()
    }
}

/// Gene pair `2i, 2i + 1` holds the room and timeslot of lecture `i`.
#[derive(Debug, Clone)]
pub struct InstitutionEncoding<'a> {
    problem: &'a InstitutionProblem,
    gene_space: GeneSpace,
}

impl<'a> InstitutionEncoding<'a> {
    /// # Errors
    ///
    /// Returns `TimetableError::Configuration` when there is nothing to place,
    /// no classroom, or no timeslot.
    pub fn new(problem: &'a InstitutionProblem) -> Result<Self> {
        if problem.lectures.is_empty() {
            return Err(TimetableError::Configuration(
                "No lectures to schedule".to_string(),
            ));
        }
        if problem.classrooms.is_empty() {
            return Err(TimetableError::Configuration(
                "No classrooms to place lectures in".to_string(),
            ));
        }
        if problem.timeslots.is_empty() {
            return Err(TimetableError::Configuration(
                "Timeslot universe is empty".to_string(),
            ));
        }

        let room = GeneBound::upto(problem.classrooms.len())?;
        let slot = GeneBound::upto(problem.timeslots.len())?;
        let bounds = problem
            .lectures
            .iter()
            .flat_map(|_| [room, slot])
            .collect();

        Ok(Self {
            problem,
            gene_space: GeneSpace::new(bounds)?,
        })
    }

    pub fn problem(&self) -> &'a InstitutionProblem {
        self.problem
    }
}

impl ChromosomeEncoding for InstitutionEncoding<'_> {
    type Decoded = InstitutionSchedule;

    fn gene_space(&self) -> &GeneSpace {
        &self.gene_space
    }

    fn decode(&self, chromosome: &Chromosome) -> Result<InstitutionSchedule> {
        self.gene_space.check(chromosome)?;

        let placements = chromosome
            .genes()
            .chunks_exact(2)
            .enumerate()
            .map(|(lecture, pair)| Placement {
                lecture,
                room: pair[0],
                timeslot: pair[1],
            })
            .collect();

        Ok(InstitutionSchedule { placements })
    }
}

/// Teacher and room double-bookings plus teacher availability.
#[derive(Debug, Clone, Copy)]
pub struct InstitutionEvaluator<'a> {
    problem: &'a InstitutionProblem,
}

impl<'a> InstitutionEvaluator<'a> {
    pub fn new(problem: &'a InstitutionProblem) -> Self {
        Self { problem }
    }
}

impl PenaltyEvaluator<InstitutionSchedule> for InstitutionEvaluator<'_> {
    fn scan<F>(&self, schedule: &InstitutionSchedule, mut on_violation: F)
    where
        F: FnMut(Violation),
    {
        let mut teacher_bookings = HashSet::with_capacity(schedule.len());
        let mut room_bookings = HashSet::with_capacity(schedule.len());

        for (position, placement) in schedule.placements.iter().enumerate() {
            let teacher = self.problem.lecture_teacher[placement.lecture];

            if !teacher_bookings.insert((teacher, placement.timeslot)) {
                on_violation(Violation::new(ViolationKind::TeacherDoubleBooked, position));
            }

            if !room_bookings.insert((placement.room, placement.timeslot)) {
                on_violation(Violation::new(ViolationKind::RoomDoubleBooked, position));
            }

            if !self.problem.is_available_at(teacher, placement.timeslot) {
                on_violation(Violation::new(ViolationKind::OutsideAvailability, position));
            }
        }
    }
}

/// Runs the institution-wide search for one problem.
#[derive(Debug, Clone)]
pub struct InstitutionScheduler {
    problem: InstitutionProblem,
    options: EvolutionOptions,
}

impl InstitutionScheduler {
    /// Validates the options and the gene space before anything runs.
    pub fn new(problem: InstitutionProblem, options: EvolutionOptions) -> Result<Self> {
        options.validate()?;
        InstitutionEncoding::new(&problem)?;
        Ok(Self { problem, options })
    }

    pub fn problem(&self) -> &InstitutionProblem {
        &self.problem
    }

    pub fn options(&self) -> &EvolutionOptions {
        &self.options
    }

    /// Runs with progress reported as `tracing` events.
    pub fn run(&self) -> Result<ScheduleOutcome> {
        self.run_with_observer(&mut TracingObserver::with_label("institution"))
    }

    pub fn run_with_observer<O>(&self, observer: &mut O) -> Result<ScheduleOutcome>
    where
        O: GenerationObserver + ?Sized,
    {
        info!(
            lectures = self.problem.lectures.len(),
            generations = self.options.get_num_generations(),
            "starting institution schedule evolution"
        );

        let encoding = InstitutionEncoding::new(&self.problem)?;
        let evaluator = InstitutionEvaluator::new(&self.problem);
        let (schedule, outcome) = evolve(encoding, evaluator, &self.options, observer)?;
        let outcome = outcome.with_schedule(schedule.to_lectures(&self.problem)?);

        info!(penalty = outcome.penalty, "institution schedule evolution finished");
        Ok(outcome)
    }
}
