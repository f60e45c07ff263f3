//! # BreedStrategy
//!
//! The `BreedStrategy` trait defines the interface for strategies responsible for breeding
//! offspring chromosomes from a mating pool.
pub mod single_point;

use std::fmt::Debug;

use crate::{
    chromosome::{Chromosome, GeneSpace},
    error::Result,
    evolution::options::EvolutionOptions,
    rng::RandomNumberGenerator,
};

/// # BreedStrategy
///
/// Produces offspring from a mating pool. Offspring must stay within the gene
/// space: every gene of every child respects its declared bound.
pub trait BreedStrategy
where
    Self: Debug + Clone + Send + Sync,
{
    /// Breeds exactly `num_offspring` children.
    ///
    /// ## Parameters
    ///
    /// - `parents`: The mating pool, best first.
    /// - `num_offspring`: How many children to produce.
    /// - `gene_space`: The bounds every child must respect.
    /// - `evol_options`: Evolution options, e.g. the mutation percentage.
    /// - `rng`: The run's random number generator.
    ///
    /// ## Errors
    ///
    /// This method fails if the mating pool is empty while offspring are requested.
    fn breed(
        &self,
        parents: &[&Chromosome],
        num_offspring: usize,
        gene_space: &GeneSpace,
        evol_options: &EvolutionOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Chromosome>>;
}

pub use single_point::SinglePointStrategy;
