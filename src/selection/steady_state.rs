use crate::error::{Result, TimetableError};
use crate::evolution::population::rank_descending;
use crate::selection::selection_strategy::SelectionStrategy;

/// Steady-state selection: the top-ranked individuals become the mating pool.
///
/// Individuals are ranked by fitness, highest first; ties keep population
/// order, so the selection is fully determined by the fitness slice.
///
/// # Examples
///
/// ```
/// use timetable_ga::selection::{SelectionStrategy, SteadyStateSelection};
///
/// let fitness = vec![0.5, 0.8, 0.3, 0.8];
/// let parents = SteadyStateSelection::default().select(&fitness, 3)?;
///
/// // Equal fitness keeps population order
/// assert_eq!(parents, vec![1, 3, 0]);
/// # Ok::<(), timetable_ga::error::TimetableError>(())
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct SteadyStateSelection;

impl SteadyStateSelection {
    pub fn new() -> Self {
        Self
    }
}

impl SelectionStrategy for SteadyStateSelection {
    fn select(&self, fitness: &[f64], num_to_select: usize) -> Result<Vec<usize>> {
        if fitness.is_empty() {
            return Err(TimetableError::EmptyPopulation);
        }

        if num_to_select > fitness.len() {
            return Err(TimetableError::Configuration(format!(
                "Cannot select {} parents from a population of {}",
                num_to_select,
                fitness.len()
            )));
        }

        let mut ranked = rank_descending(fitness);
        ranked.truncate(num_to_select);
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steady_state_selection() {
        // Fitness values (not in order of population)
        let fitness = vec![0.5, 0.8, 0.3, 0.9, 0.1];

        let selected = SteadyStateSelection::new().select(&fitness, 3).unwrap();

        // indices 3, 1, 0 with fitness 0.9, 0.8, 0.5
        assert_eq!(selected, vec![3, 1, 0]);
    }

    #[test]
    fn test_ties_broken_by_population_order() {
        let fitness = vec![0.2, 0.7, 0.7, 0.7];
        let selected = SteadyStateSelection::new().select(&fitness, 2).unwrap();
        assert_eq!(selected, vec![1, 2]);
    }

    #[test]
    fn test_select_whole_population() {
        let fitness = vec![0.5, 0.8];
        let selected = SteadyStateSelection::new().select(&fitness, 2).unwrap();
        assert_eq!(selected, vec![1, 0]);
    }

    #[test]
    fn test_empty_population() {
        let result = SteadyStateSelection::new().select(&[], 1);
        assert!(matches!(result, Err(TimetableError::EmptyPopulation)));
    }

    #[test]
    fn test_too_many_parents() {
        let result = SteadyStateSelection::new().select(&[0.1, 0.2], 3);
        assert!(matches!(result, Err(TimetableError::Configuration(_))));
    }

    #[test]
    fn test_nan_is_selected_last() {
        let fitness = vec![0.5, f64::NAN, 0.3];
        let selected = SteadyStateSelection::new().select(&fitness, 3).unwrap();
        assert_eq!(selected, vec![0, 2, 1]);
    }
}
