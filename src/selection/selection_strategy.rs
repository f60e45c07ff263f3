use std::fmt::Debug;

use crate::error::Result;

/// Trait for parent selection strategies.
///
/// A strategy picks the mating pool from the current population by index,
/// looking only at the cached fitness values. Strategies must be deterministic
/// given the fitness slice; randomness belongs to breeding.
///
/// # Examples
///
/// ```
/// use timetable_ga::selection::{SelectionStrategy, SteadyStateSelection};
///
/// let fitness = vec![0.5, 0.8, 0.3];
/// let selected = SteadyStateSelection::new().select(&fitness, 2)?;
/// assert_eq!(selected, vec![1, 0]);
/// # Ok::<(), timetable_ga::error::TimetableError>(())
/// ```
pub trait SelectionStrategy: Debug + Send + Sync {
    /// Selects `num_to_select` population indices from the fitness scores.
    ///
    /// # Errors
    ///
    /// Returns an error if the population is empty or asks for more parents
    /// than the population holds.
    fn select(&self, fitness: &[f64], num_to_select: usize) -> Result<Vec<usize>>;
}
