//! # Constraints Module
//!
//! Every scheduling rule is soft: instead of pruning candidates, a violated rule
//! adds a fixed weight to the schedule's penalty. A penalty of zero means the
//! schedule satisfies every modeled rule.
//!
//! ## Key Components
//!
//! - `ViolationKind`: the rules and their weights
//! - `Violation`: one occurrence of a rule being broken, pointing at an entry of
//!   the decoded schedule
//! - `PenaltyEvaluator` trait: scans a decoded schedule once and reports every
//!   violation to a sink; the scalar penalty and the itemized report are both
//!   derived from that single scan
//!
//! ## Basic Usage
//!
//! ```rust
//! use timetable_ga::constraints::{PenaltyEvaluator, Violation, ViolationKind};
//!
//! /// Penalizes every repeated value.
//! struct NoRepeats;
//!
//! impl PenaltyEvaluator<Vec<u32>> for NoRepeats {
//!     fn scan<F>(&self, schedule: &Vec<u32>, mut on_violation: F)
//!     where
//!         F: FnMut(Violation),
//!     {
//!         let mut seen = std::collections::HashSet::new();
//!         for (position, value) in schedule.iter().enumerate() {
//!             if !seen.insert(value) {
//!                 on_violation(Violation::new(ViolationKind::RoomDoubleBooked, position));
//!             }
//!         }
//!     }
//! }
//!
//! assert_eq!(NoRepeats.penalty(&vec![1, 2, 3]), 0);
//! assert_eq!(NoRepeats.penalty(&vec![1, 2, 1, 1]), 2000);
//! assert_eq!(NoRepeats.violations(&vec![1, 1]).len(), 1);
//! ```

use std::fmt::{self, Display};

/// Weight of a teacher or room double-booking, and of a student time conflict.
pub const CONFLICT_PENALTY: u64 = 1000;
/// Weight of a lecture outside its teacher's preferred availability.
pub const AVAILABILITY_PENALTY: u64 = 500;
/// Weight of each distinct day a student has to attend.
pub const STUDY_DAY_PENALTY: u64 = 10;

/// The modeled scheduling rules.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// A teacher holds a second lecture in the same timeslot.
    TeacherDoubleBooked,
    /// A room hosts a second lecture in the same timeslot.
    RoomDoubleBooked,
    /// A lecture starts outside every availability window of its teacher for that day.
    OutsideAvailability,
    /// A student attends a second lecture in the same timeslot.
    StudentTimeConflict,
    /// A student has to come in on one more day.
    StudyDay,
}

impl ViolationKind {
    /// The penalty added for one occurrence.
    pub fn weight(self) -> u64 {
        match self {
            ViolationKind::TeacherDoubleBooked
            | ViolationKind::RoomDoubleBooked
            | ViolationKind::StudentTimeConflict => CONFLICT_PENALTY,
            ViolationKind::OutsideAvailability => AVAILABILITY_PENALTY,
            ViolationKind::StudyDay => STUDY_DAY_PENALTY,
        }
    }
}

impl Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViolationKind::TeacherDoubleBooked => "teacher double-booked",
            ViolationKind::RoomDoubleBooked => "room double-booked",
            ViolationKind::OutsideAvailability => "outside teacher availability",
            ViolationKind::StudentTimeConflict => "student time conflict",
            ViolationKind::StudyDay => "study day",
        };
        f.write_str(name)
    }
}

/// One occurrence of a rule being broken.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Violation {
    kind: ViolationKind,
    /// Index of the offending entry in the decoded schedule.
    position: usize,
}

impl Violation {
    pub fn new(kind: ViolationKind, position: usize) -> Self {
        Self { kind, position }
    }

    pub fn kind(&self) -> ViolationKind {
        self.kind
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn weight(&self) -> u64 {
        self.kind.weight()
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at entry {} (+{})",
            self.kind,
            self.position,
            self.weight()
        )
    }
}

/// Scores a decoded schedule by summing weighted rule violations.
///
/// Implementations must be pure functions of the schedule and their own
/// read-only problem data, so they can be called concurrently.
pub trait PenaltyEvaluator<S>: Send + Sync {
    /// Scans the schedule once, reporting each violation to `on_violation`.
    fn scan<F>(&self, schedule: &S, on_violation: F)
    where
        F: FnMut(Violation);

    /// Total penalty; lower is better, zero is fully feasible.
    fn penalty(&self, schedule: &S) -> u64 {
        let mut total = 0;
        self.scan(schedule, |violation| total += violation.weight());
        total
    }

    /// Itemized violations, in scan order.
    fn violations(&self, schedule: &S) -> Vec<Violation> {
        let mut violations = Vec::new();
        self.scan(schedule, |violation| violations.push(violation));
        violations
    }
}
