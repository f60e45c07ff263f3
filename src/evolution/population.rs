//! # Population
//!
//! An ordered collection of chromosomes with their cached fitness. The order is
//! meaningful: ranking is stable, so individuals with equal fitness keep their
//! population order.

use std::cmp::Ordering;

use rayon::prelude::*;

use super::challenge::Challenge;
use crate::{
    chromosome::Chromosome,
    error::{Result, TimetableError},
};

/// A chromosome together with its cached fitness.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    pub chromosome: Chromosome,
    pub fitness: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    pub fn from_individuals(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }

    /// Scores every chromosome and keeps the input order.
    ///
    /// Batches of at least `parallel_threshold` chromosomes are scored on the
    /// rayon pool; scoring is pure, so the result does not depend on the path.
    ///
    /// # Errors
    ///
    /// Propagates scoring errors and rejects non-finite fitness values with
    /// `TimetableError::FitnessCalculation`.
    pub fn evaluate<C>(
        chromosomes: Vec<Chromosome>,
        challenge: &C,
        parallel_threshold: usize,
    ) -> Result<Vec<Individual>>
    where
        C: Challenge + ?Sized,
    {
        let score = |chromosome: Chromosome| -> Result<Individual> {
            let fitness = challenge.score(&chromosome)?;

            // Check for invalid fitness scores
            if !fitness.is_finite() {
                return Err(TimetableError::FitnessCalculation(format!(
                    "Non-finite fitness score encountered: {}",
                    fitness
                )));
            }

            Ok(Individual {
                chromosome,
                fitness,
            })
        };

        if chromosomes.len() >= parallel_threshold {
            chromosomes.into_par_iter().map(score).collect()
        } else {
            chromosomes.into_iter().map(score).collect()
        }
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn fitness(&self) -> Vec<f64> {
        self.individuals.iter().map(|i| i.fitness).collect()
    }

    /// The fittest individual; the earliest one wins ties.
    pub fn best(&self) -> Option<&Individual> {
        self.individuals.iter().reduce(|best, candidate| {
            if candidate.fitness > best.fitness {
                candidate
            } else {
                best
            }
        })
    }

    /// Indices ordered by fitness, descending, ties in population order.
    pub fn ranked_indices(&self) -> Vec<usize> {
        rank_descending(&self.fitness())
    }
}

/// Stable descending ranking of fitness values; NaN sorts last.
pub(crate) fn rank_descending(fitness: &[f64]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..fitness.len()).collect();
    indices.sort_by(|&a, &b| {
        let (fa, fb) = (fitness[a], fitness[b]);
        fb.partial_cmp(&fa).unwrap_or_else(|| {
            // Handle NaN values by considering them less than any other value
            if fa.is_nan() && fb.is_nan() {
                Ordering::Equal
            } else if fa.is_nan() {
                Ordering::Greater
            } else {
                Ordering::Less
            }
        })
    });
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolution::challenge::FnChallenge;

    fn individual(genes: Vec<usize>, fitness: f64) -> Individual {
        Individual {
            chromosome: Chromosome::new(genes),
            fitness,
        }
    }

    fn sum_challenge() -> FnChallenge<impl Fn(&Chromosome) -> f64 + Send + Sync> {
        FnChallenge::new(|c: &Chromosome| c.genes().iter().sum::<usize>() as f64)
    }

    #[test]
    fn test_evaluate_keeps_order() {
        let chromosomes = vec![
            Chromosome::new(vec![1, 1]),
            Chromosome::new(vec![5, 0]),
            Chromosome::new(vec![0, 0]),
        ];
        let scored = Population::evaluate(chromosomes, &sum_challenge(), 1000).unwrap();
        assert_eq!(
            scored.iter().map(|i| i.fitness).collect::<Vec<_>>(),
            vec![2.0, 5.0, 0.0]
        );
    }

    #[test]
    fn test_parallel_and_sequential_evaluation_agree() {
        let chromosomes: Vec<Chromosome> =
            (0..64).map(|i| Chromosome::new(vec![i, i * 2, 3])).collect();
        let challenge = sum_challenge();
        let sequential = Population::evaluate(chromosomes.clone(), &challenge, usize::MAX).unwrap();
        let parallel = Population::evaluate(chromosomes, &challenge, 1).unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_evaluate_rejects_non_finite_fitness() {
        let challenge = FnChallenge::new(|_: &Chromosome| f64::INFINITY);
        let result = Population::evaluate(vec![Chromosome::new(vec![0])], &challenge, 1000);
        assert!(matches!(result, Err(TimetableError::FitnessCalculation(_))));
    }

    #[test]
    fn test_best_prefers_earliest_on_ties() {
        let population = Population::from_individuals(vec![
            individual(vec![0], 0.5),
            individual(vec![1], 0.9),
            individual(vec![2], 0.9),
        ]);
        assert_eq!(population.best().unwrap().chromosome.genes(), &[1]);
        assert!(Population::default().best().is_none());
    }

    #[test]
    fn test_ranked_indices_are_stable() {
        let population = Population::from_individuals(vec![
            individual(vec![0], 0.5),
            individual(vec![1], 0.8),
            individual(vec![2], 0.5),
            individual(vec![3], 0.9),
        ]);
        assert_eq!(population.ranked_indices(), vec![3, 1, 0, 2]);
    }

    #[test]
    fn test_nan_ranks_last() {
        assert_eq!(rank_descending(&[f64::NAN, 0.1, 0.3]), vec![2, 1, 0]);
    }
}
