use crate::{
    chromosome::{Chromosome, ChromosomeEncoding},
    constraints::PenaltyEvaluator,
    error::Result,
};

/// Keeps fitness finite when the penalty is exactly zero.
pub const FITNESS_EPSILON: f64 = 1e-9;

/// Converts a penalty (lower is better) into a fitness (higher is better).
pub fn fitness_from_penalty(penalty: u64) -> f64 {
    1.0 / (penalty as f64 + FITNESS_EPSILON)
}

/// Scores a chromosome; higher is better.
///
/// Implementations must be pure so the engine can score a population concurrently.
pub trait Challenge: Send + Sync {
    fn score(&self, chromosome: &Chromosome) -> Result<f64>;
}

impl<T> Challenge for &T
where
    T: Challenge + ?Sized,
{
    fn score(&self, chromosome: &Chromosome) -> Result<f64> {
        (**self).score(chromosome)
    }
}

/// Scores chromosomes by decoding them and inverting the schedule's penalty.
#[derive(Debug, Clone)]
pub struct PenaltyChallenge<E, V> {
    encoding: E,
    evaluator: V,
}

impl<E, V> PenaltyChallenge<E, V>
where
    E: ChromosomeEncoding,
    V: PenaltyEvaluator<E::Decoded>,
{
    pub fn new(encoding: E, evaluator: V) -> Self {
        Self {
            encoding,
            evaluator,
        }
    }

    pub fn encoding(&self) -> &E {
        &self.encoding
    }

    pub fn evaluator(&self) -> &V {
        &self.evaluator
    }

    /// Decodes and returns the raw penalty.
    pub fn penalty(&self, chromosome: &Chromosome) -> Result<u64> {
        let schedule = self.encoding.decode(chromosome)?;
        Ok(self.evaluator.penalty(&schedule))
    }
}

impl<E, V> Challenge for PenaltyChallenge<E, V>
where
    E: ChromosomeEncoding,
    V: PenaltyEvaluator<E::Decoded>,
{
    fn score(&self, chromosome: &Chromosome) -> Result<f64> {
        self.penalty(chromosome).map(fitness_from_penalty)
    }
}

/// Adapts a plain scoring closure, mostly useful for tests and benchmarks.
pub struct FnChallenge<F> {
    score_fn: F,
}

impl<F> FnChallenge<F>
where
    F: Fn(&Chromosome) -> f64 + Send + Sync,
{
    pub fn new(score_fn: F) -> Self {
        Self { score_fn }
    }
}

impl<F> Challenge for FnChallenge<F>
where
    F: Fn(&Chromosome) -> f64 + Send + Sync,
{
    fn score(&self, chromosome: &Chromosome) -> Result<f64> {
        Ok((self.score_fn)(chromosome))
    }
}
