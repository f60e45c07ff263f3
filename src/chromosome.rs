//! # Chromosome
//!
//! A chromosome is a fixed-length vector of integer genes. Each gene position
//! has a declared `[low, high)` bound, and the collection of bounds for a whole
//! chromosome is its [`GeneSpace`]. Chromosomes hold indices only, never
//! references to domain objects; decoding them is the job of a
//! [`ChromosomeEncoding`].
//!
//! ## Example
//!
//! ```rust
//! use timetable_ga::chromosome::{GeneBound, GeneSpace};
//! use timetable_ga::rng::RandomNumberGenerator;
//!
//! let space = GeneSpace::new(vec![GeneBound::new(0, 3)?, GeneBound::new(0, 45)?])?;
//! let mut rng = RandomNumberGenerator::from_seed(1);
//! let chromosome = space.random_chromosome(&mut rng);
//!
//! assert_eq!(chromosome.len(), 2);
//! assert!(space.check(&chromosome).is_ok());
//! # Ok::<(), timetable_ga::error::TimetableError>(())
//! ```

use std::ops::Index;

use crate::error::{Result, TimetableError};
use crate::rng::RandomNumberGenerator;

/// The inclusive-exclusive value range `[low, high)` of a single gene.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneBound {
    low: usize,
    high: usize,
}

impl GeneBound {
    /// Creates a bound, rejecting empty ranges.
    pub fn new(low: usize, high: usize) -> Result<Self> {
        if low >= high {
            return Err(TimetableError::Configuration(format!(
                "Gene bound [{}, {}) has no valid values",
                low, high
            )));
        }
        Ok(Self { low, high })
    }

    /// Creates the bound `[0, choices)`.
    pub fn upto(choices: usize) -> Result<Self> {
        Self::new(0, choices)
    }

    pub fn low(&self) -> usize {
        self.low
    }

    pub fn high(&self) -> usize {
        self.high
    }

    pub fn contains(&self, value: usize) -> bool {
        (self.low..self.high).contains(&value)
    }

    /// Draws a value uniformly from this bound.
    pub fn sample(&self, rng: &mut RandomNumberGenerator) -> usize {
        rng.gen_index(self.low, self.high)
    }
}

/// The per-gene bound declaration for a whole chromosome.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneSpace {
    bounds: Vec<GeneBound>,
}

impl GeneSpace {
    /// Creates a gene space. A space without genes cannot be searched.
    pub fn new(bounds: Vec<GeneBound>) -> Result<Self> {
        if bounds.is_empty() {
            return Err(TimetableError::Configuration(
                "Gene space must declare at least one gene".to_string(),
            ));
        }
        Ok(Self { bounds })
    }

    pub fn num_genes(&self) -> usize {
        self.bounds.len()
    }

    pub fn bounds(&self) -> &[GeneBound] {
        &self.bounds
    }

    /// Draws every gene independently and uniformly from its own bound.
    pub fn random_chromosome(&self, rng: &mut RandomNumberGenerator) -> Chromosome {
        Chromosome {
            genes: self.bounds.iter().map(|bound| bound.sample(rng)).collect(),
        }
    }

    /// Verifies the chromosome has the right length and respects every bound.
    pub fn check(&self, chromosome: &Chromosome) -> Result<()> {
        if chromosome.len() != self.num_genes() {
            return Err(TimetableError::Configuration(format!(
                "Chromosome has {} genes, gene space declares {}",
                chromosome.len(),
                self.num_genes()
            )));
        }

        for (index, (&value, bound)) in chromosome.genes.iter().zip(&self.bounds).enumerate() {
            if !bound.contains(value) {
                return Err(TimetableError::OutOfBounds {
                    index,
                    value,
                    low: bound.low,
                    high: bound.high,
                });
            }
        }

        Ok(())
    }
}

impl Index<usize> for GeneSpace {
    type Output = GeneBound;

    fn index(&self, index: usize) -> &Self::Output {
        &self.bounds[index]
    }
}

/// A fixed-length ordered sequence of gene values.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chromosome {
    genes: Vec<usize>,
}

impl Chromosome {
    pub fn new(genes: Vec<usize>) -> Self {
        Self { genes }
    }

    pub fn genes(&self) -> &[usize] {
        &self.genes
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Builds the offspring taking `self` before `point` and `other` from `point` onward.
    ///
    /// `point` is clamped to the chromosome length, so a point of zero yields a copy
    /// of `other` and a point at or past the end yields a copy of `self`.
    pub fn single_point_crossover(&self, other: &Self, point: usize) -> Self {
        let point = point.min(self.genes.len());
        let mut genes = Vec::with_capacity(self.genes.len());
        genes.extend_from_slice(&self.genes[..point]);
        genes.extend_from_slice(&other.genes[point..]);
        Self { genes }
    }

    /// Random-reset mutation: each gene is redrawn from its own bound with `probability`.
    ///
    /// Returns the number of genes that were redrawn.
    pub fn mutate(
        &mut self,
        space: &GeneSpace,
        probability: f64,
        rng: &mut RandomNumberGenerator,
    ) -> usize {
        let mut mutated = 0;
        for (gene, bound) in self.genes.iter_mut().zip(space.bounds()) {
            if rng.gen_chance(probability) {
                *gene = bound.sample(rng);
                mutated += 1;
            }
        }
        mutated
    }
}

impl Index<usize> for Chromosome {
    type Output = usize;

    fn index(&self, index: usize) -> &Self::Output {
        &self.genes[index]
    }
}

impl From<Vec<usize>> for Chromosome {
    fn from(genes: Vec<usize>) -> Self {
        Self::new(genes)
    }
}

/// Maps a problem instance onto a gene space and decodes chromosomes back.
///
/// Decoding is a pure index lookup. It must succeed for every chromosome that
/// passes [`GeneSpace::check`]; implementations report anything else as
/// `TimetableError::OutOfBounds`.
pub trait ChromosomeEncoding: Send + Sync {
    /// The domain-level schedule a chromosome stands for.
    type Decoded;

    fn gene_space(&self) -> &GeneSpace;

    fn decode(&self, chromosome: &Chromosome) -> Result<Self::Decoded>;
}
