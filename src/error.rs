//! # Error Types
//!
//! This module defines the error type shared by the whole crate. Construction
//! problems (bad options, unknown ids, empty gene spaces) surface here before
//! any generation runs; constraint violations inside the search never do, they
//! are expressed as penalty instead.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use timetable_ga::error::{Result, TimetableError};
//!
//! fn check_rooms(rooms: &[&str]) -> Result<()> {
//!     if rooms.is_empty() {
//!         return Err(TimetableError::Configuration("no classrooms".to_string()));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_rooms(&[]).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use timetable_ga::error::{OptionExt, TimetableError};
//!
//! fn best(fitness: &[f64]) -> timetable_ga::error::Result<f64> {
//!     fitness.iter().cloned().reduce(f64::max).ok_or_else_timetable(||
//!         TimetableError::EmptyPopulation
//!     )
//! }
//!
//! assert!(best(&[]).is_err());
//! ```

use thiserror::Error;

/// Represents errors that can occur while building or running a scheduler.
#[derive(Error, Debug)]
pub enum TimetableError {
    /// A decision unit has no valid choices, or the evolution options are inconsistent.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An id referenced by one input table is absent from its reference table.
    #[error("Input validation error: unknown {kind} '{id}'")]
    UnknownReference {
        /// The kind of entity, e.g. `"course"`.
        kind: &'static str,
        /// The offending id.
        id: String,
    },

    /// Input records are malformed or missing.
    #[error("Input validation error: {0}")]
    InputValidation(String),

    /// A gene lies outside of its declared `[low, high)` bound.
    #[error("Bounds error: gene {index} has value {value}, outside of [{low}, {high})")]
    OutOfBounds {
        index: usize,
        value: usize,
        low: usize,
        high: usize,
    },

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// Error that occurs when a fitness calculation fails.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),

    /// Error that occurs when the evolution engine is driven incorrectly.
    #[error("Evolution error: {0}")]
    Evolution(String),
}

/// A specialized Result type for scheduler operations.
pub type Result<T> = std::result::Result<T, TimetableError>;

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, TimetableError>` using
    /// a closure to generate the error.
    fn ok_or_else_timetable<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> TimetableError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_timetable<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> TimetableError,
    {
        self.ok_or_else(err_fn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_reference_message_names_id() {
        let err = TimetableError::UnknownReference {
            kind: "course",
            id: "CS404".to_string(),
        };
        assert_eq!(err.to_string(), "Input validation error: unknown course 'CS404'");
    }

    #[test]
    fn test_option_ext() {
        let none: Option<u8> = None;
        assert!(matches!(
            none.ok_or_else_timetable(|| TimetableError::EmptyPopulation),
            Err(TimetableError::EmptyPopulation)
        ));
        assert_eq!(Some(3).ok_or_else_timetable(|| TimetableError::EmptyPopulation).unwrap(), 3);
    }
}
