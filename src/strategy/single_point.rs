//! # SinglePointStrategy
//!
//! Single-point crossover followed by random-reset mutation. Offspring `k`
//! takes parent `k mod P` before a random cut and parent `(k + 1) mod P` from
//! the cut onward, then every gene is redrawn from its own bound with the
//! configured mutation probability.

use super::BreedStrategy;
use crate::{
    chromosome::{Chromosome, GeneSpace},
    error::{Result, TimetableError},
    evolution::options::EvolutionOptions,
    rng::RandomNumberGenerator,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct SinglePointStrategy;

impl SinglePointStrategy {
    pub fn new() -> Self {
        Self
    }

    /// Draws a cut uniformly from `[1, num_genes - 1]`.
    ///
    /// Chromosomes with fewer than two genes cannot be cut; the cut then lies
    /// past the end and the child is a copy of parent A.
    pub fn crossover_point(num_genes: usize, rng: &mut RandomNumberGenerator) -> usize {
        if num_genes < 2 {
            num_genes
        } else {
            rng.gen_index(1, num_genes)
        }
    }
}

impl BreedStrategy for SinglePointStrategy {
    fn breed(
        &self,
        parents: &[&Chromosome],
        num_offspring: usize,
        gene_space: &GeneSpace,
        evol_options: &EvolutionOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Chromosome>> {
        if num_offspring == 0 {
            return Ok(Vec::new());
        }

        // Check if parents slice is empty
        if parents.is_empty() {
            return Err(TimetableError::EmptyPopulation);
        }

        let probability = evol_options.mutation_probability();
        let num_genes = gene_space.num_genes();

        // Sequential on purpose: every draw comes from the run's seeded generator.
        let children = (0..num_offspring)
            .map(|k| {
                let parent_a = parents[k % parents.len()];
                let parent_b = parents[(k + 1) % parents.len()];

                let point = Self::crossover_point(num_genes, rng);
                let mut child = parent_a.single_point_crossover(parent_b, point);
                child.mutate(gene_space, probability, rng);
                child
            })
            .collect();

        Ok(children)
    }
}
