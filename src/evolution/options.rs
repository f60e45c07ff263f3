//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct holds the parameters of one evolution run:
//! the number of generations, the size of the mating pool, the population size
//! and the per-gene mutation percentage. All four are required; nothing is
//! silently defaulted.
//!
//! ## Example
//!
//! ```rust
//! use timetable_ga::evolution::options::EvolutionOptions;
//!
//! // Direct construction
//! let options = EvolutionOptions::new(200, 10, 50, 5.0);
//! assert!(options.validate().is_ok());
//!
//! // Builder, with the optional knobs
//! let options = EvolutionOptions::builder()
//!     .num_generations(200)
//!     .num_parents_mating(10)
//!     .sol_per_pop(50)
//!     .mutation_percent_genes(5.0)
//!     .seed(42)
//!     .build()?;
//! assert_eq!(options.get_seed(), Some(42));
//! # Ok::<(), timetable_ga::error::TimetableError>(())
//! ```

use crate::error::{Result, TimetableError};

/// Default minimum batch size for rayon-parallel fitness evaluation.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1000;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionOptions {
    num_generations: usize,
    num_parents_mating: usize,
    sol_per_pop: usize,
    mutation_percent_genes: f64,
    /// Minimum number of individuals to evaluate in parallel
    #[cfg_attr(feature = "serde", serde(default = "default_parallel_threshold"))]
    parallel_threshold: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    seed: Option<u64>,
}

#[cfg(feature = "serde")]
fn default_parallel_threshold() -> usize {
    DEFAULT_PARALLEL_THRESHOLD
}

impl EvolutionOptions {
    pub fn new(
        num_generations: usize,
        num_parents_mating: usize,
        sol_per_pop: usize,
        mutation_percent_genes: f64,
    ) -> Self {
        Self {
            num_generations,
            num_parents_mating,
            sol_per_pop,
            mutation_percent_genes,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            seed: None,
        }
    }

    /// Returns a builder for creating an `EvolutionOptions` instance.
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }

    /// Checks the ranges every run relies on.
    ///
    /// # Errors
    ///
    /// Returns `TimetableError::Configuration` when the generation count or
    /// population size is zero, the mating pool is empty or larger than the
    /// population, or the mutation percentage is not within `[0, 100]`.
    pub fn validate(&self) -> Result<()> {
        if self.num_generations == 0 {
            return Err(TimetableError::Configuration(
                "Number of generations must be positive".to_string(),
            ));
        }

        if self.sol_per_pop == 0 {
            return Err(TimetableError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }

        if self.num_parents_mating == 0 {
            return Err(TimetableError::Configuration(
                "Number of parents mating must be positive".to_string(),
            ));
        }

        if self.num_parents_mating > self.sol_per_pop {
            return Err(TimetableError::Configuration(format!(
                "Number of parents mating ({}) exceeds population size ({})",
                self.num_parents_mating, self.sol_per_pop
            )));
        }

        if !self.mutation_percent_genes.is_finite()
            || !(0.0..=100.0).contains(&self.mutation_percent_genes)
        {
            return Err(TimetableError::Configuration(format!(
                "Mutation percentage must lie within [0, 100], got {}",
                self.mutation_percent_genes
            )));
        }

        Ok(())
    }

    pub fn get_num_generations(&self) -> usize {
        self.num_generations
    }

    pub fn get_num_parents_mating(&self) -> usize {
        self.num_parents_mating
    }

    pub fn get_sol_per_pop(&self) -> usize {
        self.sol_per_pop
    }

    pub fn get_mutation_percent_genes(&self) -> f64 {
        self.mutation_percent_genes
    }

    /// Per-gene mutation probability derived from the percentage.
    pub fn mutation_probability(&self) -> f64 {
        self.mutation_percent_genes / 100.0
    }

    /// Returns the minimum number of individuals to evaluate in parallel.
    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    /// Sets the parallel threshold.
    pub fn set_parallel_threshold(&mut self, threshold: usize) {
        self.parallel_threshold = threshold;
    }

    /// Sets the seed that makes a run reproducible.
    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
    }
}

/// Builder for `EvolutionOptions`.
#[derive(Debug, Clone, Default)]
pub struct EvolutionOptionsBuilder {
    num_generations: Option<usize>,
    num_parents_mating: Option<usize>,
    sol_per_pop: Option<usize>,
    mutation_percent_genes: Option<f64>,
    parallel_threshold: Option<usize>,
    seed: Option<u64>,
}

impl EvolutionOptionsBuilder {
    pub fn num_generations(mut self, value: usize) -> Self {
        self.num_generations = Some(value);
        self
    }

    pub fn num_parents_mating(mut self, value: usize) -> Self {
        self.num_parents_mating = Some(value);
        self
    }

    pub fn sol_per_pop(mut self, value: usize) -> Self {
        self.sol_per_pop = Some(value);
        self
    }

    pub fn mutation_percent_genes(mut self, value: f64) -> Self {
        self.mutation_percent_genes = Some(value);
        self
    }

    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    pub fn seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    /// Builds and validates the options.
    ///
    /// # Errors
    ///
    /// Returns `TimetableError::Configuration` if a required parameter was
    /// never set or the resulting options fail [`EvolutionOptions::validate`].
    pub fn build(self) -> Result<EvolutionOptions> {
        let missing = |name: &str| {
            TimetableError::Configuration(format!("Evolution option '{}' not specified", name))
        };

        let options = EvolutionOptions {
            num_generations: self.num_generations.ok_or_else(|| missing("num_generations"))?,
            num_parents_mating: self
                .num_parents_mating
                .ok_or_else(|| missing("num_parents_mating"))?,
            sol_per_pop: self.sol_per_pop.ok_or_else(|| missing("sol_per_pop"))?,
            mutation_percent_genes: self
                .mutation_percent_genes
                .ok_or_else(|| missing("mutation_percent_genes"))?,
            parallel_threshold: self
                .parallel_threshold
                .unwrap_or(DEFAULT_PARALLEL_THRESHOLD),
            seed: self.seed,
        };

        options.validate()?;
        Ok(options)
    }
}
