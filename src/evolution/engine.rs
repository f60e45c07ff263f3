//! # EvolutionEngine
//!
//! Drives a generational genetic search over a fixed gene space:
//!
//! 1. steady-state selection of the mating pool,
//! 2. single-point crossover to refill the population,
//! 3. random-reset mutation of every offspring,
//! 4. fitness evaluation of the offspring,
//! 5. best-ever elitism,
//! 6. a progress event for the observer.
//!
//! The engine moves through `Initialized → Evolving → Converged`; the only way
//! to converge is to complete the configured number of generations.
//!
//! ## Example
//!
//! ```rust
//! use timetable_ga::chromosome::{Chromosome, GeneBound, GeneSpace};
//! use timetable_ga::evolution::{EvolutionEngine, EvolutionOptions, FnChallenge, NoopObserver};
//!
//! // Maximize the gene sum
//! let challenge = FnChallenge::new(|c: &Chromosome| c.genes().iter().sum::<usize>() as f64);
//! let space = GeneSpace::new(vec![GeneBound::upto(10)?; 4])?;
//! let mut options = EvolutionOptions::new(50, 4, 12, 25.0);
//! options.set_seed(Some(7));
//!
//! let result = EvolutionEngine::new(challenge, space, options)?.run(&mut NoopObserver)?;
//! assert_eq!(result.best_fitness_history.len(), 50);
//! # Ok::<(), timetable_ga::error::TimetableError>(())
//! ```

use tracing::{debug, instrument, trace};

use super::{
    challenge::Challenge,
    observer::GenerationObserver,
    options::EvolutionOptions,
    population::{Individual, Population},
};
use crate::{
    chromosome::{Chromosome, GeneSpace},
    error::{OptionExt, Result, TimetableError},
    rng::RandomNumberGenerator,
    selection::{SelectionStrategy, SteadyStateSelection},
    strategy::{BreedStrategy, SinglePointStrategy},
};

/// Lifecycle of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// The initial population is built and evaluated.
    Initialized,
    /// At least one generation has completed, but not all of them.
    Evolving,
    /// The configured number of generations has completed.
    Converged,
}

/// Represents the result of an evolution run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionResult {
    /// The best chromosome observed during the run.
    pub chromosome: Chromosome,
    /// Its fitness.
    pub fitness: f64,
    pub generations_completed: usize,
    /// Best-so-far fitness after each completed generation.
    pub best_fitness_history: Vec<f64>,
}

/// Owns the population for the duration of one run.
#[derive(Debug)]
pub struct EvolutionEngine<C, B = SinglePointStrategy, S = SteadyStateSelection>
where
    C: Challenge,
    B: BreedStrategy,
    S: SelectionStrategy,
{
    challenge: C,
    gene_space: GeneSpace,
    options: EvolutionOptions,
    strategy: B,
    selection: S,
    rng: RandomNumberGenerator,
    population: Population,
    best: Individual,
    generation: usize,
    history: Vec<f64>,
    state: EngineState,
}

impl<C> EvolutionEngine<C>
where
    C: Challenge,
{
    /// Creates an engine with steady-state selection and single-point breeding.
    ///
    /// # Errors
    ///
    /// Fails before anything is evolved if the options are invalid or the
    /// initial population cannot be scored.
    pub fn new(challenge: C, gene_space: GeneSpace, options: EvolutionOptions) -> Result<Self> {
        Self::with_strategies(
            challenge,
            gene_space,
            options,
            SinglePointStrategy::new(),
            SteadyStateSelection::new(),
        )
    }
}

impl<C, B, S> EvolutionEngine<C, B, S>
where
    C: Challenge,
    B: BreedStrategy,
    S: SelectionStrategy,
{
    /// Creates an engine with explicit breeding and selection strategies, and
    /// builds the initial population by drawing every gene uniformly from its bound.
    pub fn with_strategies(
        challenge: C,
        gene_space: GeneSpace,
        options: EvolutionOptions,
        strategy: B,
        selection: S,
    ) -> Result<Self> {
        options.validate()?;

        let mut rng = RandomNumberGenerator::from_optional_seed(options.get_seed());
        let chromosomes: Vec<Chromosome> = (0..options.get_sol_per_pop())
            .map(|_| gene_space.random_chromosome(&mut rng))
            .collect();

        let population = Population::from_individuals(Population::evaluate(
            chromosomes,
            &challenge,
            options.get_parallel_threshold(),
        )?);

        let best = population
            .best()
            .cloned()
            .ok_or_else_timetable(|| TimetableError::EmptyPopulation)?;

        debug!(
            num_genes = gene_space.num_genes(),
            sol_per_pop = options.get_sol_per_pop(),
            initial_best_fitness = best.fitness,
            "evolution engine initialized"
        );

        Ok(Self {
            challenge,
            gene_space,
            options,
            strategy,
            selection,
            rng,
            population,
            best,
            generation: 0,
            history: Vec::new(),
            state: EngineState::Initialized,
        })
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    /// The best individual observed so far, across all generations.
    pub fn best(&self) -> &Individual {
        &self.best
    }

    pub fn generations_completed(&self) -> usize {
        self.generation
    }

    pub fn challenge(&self) -> &C {
        &self.challenge
    }

    pub fn gene_space(&self) -> &GeneSpace {
        &self.gene_space
    }

    /// Runs one generation and notifies the observer.
    ///
    /// The current population is only read while the next one is built in a
    /// fresh buffer, which then replaces it.
    ///
    /// # Errors
    ///
    /// Returns `TimetableError::Evolution` when the engine has already
    /// converged, and propagates selection, breeding and scoring errors.
    pub fn step<O>(&mut self, observer: &mut O) -> Result<()>
    where
        O: GenerationObserver + ?Sized,
    {
        if self.state == EngineState::Converged {
            return Err(TimetableError::Evolution(format!(
                "Engine already converged after {} generations",
                self.generation
            )));
        }

        let fitness = self.population.fitness();
        let parent_indices = self
            .selection
            .select(&fitness, self.options.get_num_parents_mating())?;
        let parents: Vec<&Chromosome> = parent_indices
            .iter()
            .map(|&index| &self.population.individuals()[index].chromosome)
            .collect();

        // One slot is reserved for the best-ever elite
        let num_offspring = self.options.get_sol_per_pop() - 1;
        let offspring = self.strategy.breed(
            &parents,
            num_offspring,
            &self.gene_space,
            &self.options,
            &mut self.rng,
        )?;

        let offspring = Population::evaluate(
            offspring,
            &self.challenge,
            self.options.get_parallel_threshold(),
        )?;

        let mut next = Vec::with_capacity(self.options.get_sol_per_pop());
        next.push(self.best.clone());
        next.extend(offspring);
        self.population = Population::from_individuals(next);

        if let Some(candidate) = self.population.best() {
            if candidate.fitness > self.best.fitness {
                self.best = candidate.clone();
            }
        }

        self.generation += 1;
        self.history.push(self.best.fitness);
        trace!(
            generation = self.generation,
            best_fitness = self.best.fitness,
            "generation completed"
        );
        observer.on_generation(self.generation, self.best.fitness);

        self.state = if self.generation >= self.options.get_num_generations() {
            EngineState::Converged
        } else {
            EngineState::Evolving
        };

        Ok(())
    }

    /// Runs the remaining generations and reports the best chromosome.
    #[instrument(level = "debug", skip_all)]
    pub fn run<O>(mut self, observer: &mut O) -> Result<EvolutionResult>
    where
        O: GenerationObserver + ?Sized,
    {
        debug!(
            generations = self.options.get_num_generations(),
            "evolution started"
        );
        while self.state != EngineState::Converged {
            self.step(observer)?;
        }

        debug!(best_fitness = self.best.fitness, "evolution converged");
        Ok(self.snapshot())
    }

    /// The best-so-far result at the current generation boundary.
    pub fn snapshot(&self) -> EvolutionResult {
        EvolutionResult {
            chromosome: self.best.chromosome.clone(),
            fitness: self.best.fitness,
            generations_completed: self.generation,
            best_fitness_history: self.history.clone(),
        }
    }
}
