//! Timetable scheduling with a steady-state genetic algorithm.
//!
//! The [`evolution`] engine searches integer chromosomes described by a
//! [`chromosome::GeneSpace`]; the [`scheduling`] module maps institution-wide
//! and per-student timetables onto it and scores them with weighted penalties.

pub mod chromosome;
pub mod constraints;
pub mod error;
pub mod evolution;
pub mod rng;
pub mod scheduling;
pub mod selection;
pub mod strategy;

// Re-export commonly used types for convenience
pub use chromosome::{Chromosome, ChromosomeEncoding, GeneBound, GeneSpace};
pub use constraints::{PenaltyEvaluator, Violation, ViolationKind};
pub use error::{OptionExt, Result, TimetableError};
pub use evolution::{EvolutionEngine, EvolutionOptions, GenerationObserver};
pub use scheduling::{InstitutionScheduler, ScheduleOutcome, StudentScheduler};
