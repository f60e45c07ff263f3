use timetable_ga::{
    chromosome::{Chromosome, ChromosomeEncoding, GeneBound, GeneSpace},
    constraints::{PenaltyEvaluator, Violation, ViolationKind},
    error::{Result, TimetableError},
    evolution::{EngineState, EvolutionEngine, EvolutionOptions, FnChallenge, NoopObserver, PenaltyChallenge},
    rng::RandomNumberGenerator,
};

/// Assigns each of `n` items a slot out of `slots`; sharing a slot is a conflict.
struct SlotEncoding {
    space: GeneSpace,
}

impl SlotEncoding {
    fn new(items: usize, slots: usize) -> Self {
        Self {
            space: GeneSpace::new(vec![GeneBound::upto(slots).unwrap(); items]).unwrap(),
        }
    }
}

impl ChromosomeEncoding for SlotEncoding {
    type Decoded = Vec<usize>;

    fn gene_space(&self) -> &GeneSpace {
        &self.space
    }

    fn decode(&self, chromosome: &Chromosome) -> Result<Vec<usize>> {
        self.space.check(chromosome)?;
        Ok(chromosome.genes().to_vec())
    }
}

struct DistinctSlots;

impl PenaltyEvaluator<Vec<usize>> for DistinctSlots {
    fn scan<F>(&self, slots: &Vec<usize>, mut on_violation: F)
    where
        F: FnMut(Violation),
    {
        for (position, slot) in slots.iter().enumerate() {
            if slots[..position].contains(slot) {
                on_violation(Violation::new(ViolationKind::RoomDoubleBooked, position));
            }
        }
    }
}

fn options(generations: usize, seed: u64) -> EvolutionOptions {
    let mut options = EvolutionOptions::new(generations, 6, 24, 10.0);
    options.set_seed(Some(seed));
    options
}

#[test]
fn test_best_fitness_never_decreases() {
    let encoding = SlotEncoding::new(8, 10);
    let space = encoding.gene_space().clone();
    let challenge = PenaltyChallenge::new(encoding, DistinctSlots);

    let result = EvolutionEngine::new(&challenge, space, options(300, 99))
        .unwrap()
        .run(&mut NoopObserver)
        .unwrap();

    assert_eq!(result.best_fitness_history.len(), 300);
    assert!(result
        .best_fitness_history
        .windows(2)
        .all(|pair| pair[1] >= pair[0]));
    assert_eq!(result.best_fitness_history.last().copied(), Some(result.fitness));
    assert_eq!(challenge.penalty(&result.chromosome).unwrap(), 0);
}

#[test]
fn test_same_seed_same_run() {
    let run = |seed| {
        let encoding = SlotEncoding::new(6, 6);
        let space = encoding.gene_space().clone();
        EvolutionEngine::new(PenaltyChallenge::new(encoding, DistinctSlots), space, options(40, seed))
            .unwrap()
            .run(&mut NoopObserver)
            .unwrap()
    };

    assert_eq!(run(3), run(3));
}

#[test]
fn test_parallel_evaluation_matches_sequential() {
    let run = |threshold| {
        let encoding = SlotEncoding::new(6, 6);
        let space = encoding.gene_space().clone();
        let mut options = options(30, 12);
        options.set_parallel_threshold(threshold);
        EvolutionEngine::new(PenaltyChallenge::new(encoding, DistinctSlots), space, options)
            .unwrap()
            .run(&mut NoopObserver)
            .unwrap()
    };

    assert_eq!(run(1), run(usize::MAX));
}

#[test]
fn test_population_stays_within_bounds() {
    let space = GeneSpace::new(vec![
        GeneBound::new(2, 5).unwrap(),
        GeneBound::upto(1).unwrap(),
        GeneBound::new(10, 12).unwrap(),
    ])
    .unwrap();
    let challenge = FnChallenge::new(|c: &Chromosome| c.genes().iter().sum::<usize>() as f64);

    let mut options = EvolutionOptions::new(15, 3, 10, 100.0);
    options.set_seed(Some(4));
    let mut engine = EvolutionEngine::new(challenge, space.clone(), options).unwrap();

    while engine.state() != EngineState::Converged {
        engine.step(&mut NoopObserver).unwrap();
        assert_eq!(engine.population().len(), 10);
        for individual in engine.population().individuals() {
            assert!(space.check(&individual.chromosome).is_ok());
        }
    }

    assert!(matches!(
        engine.step(&mut NoopObserver),
        Err(TimetableError::Evolution(_))
    ));
}

#[test]
fn test_mutation_keeps_genes_in_bounds() {
    let space = GeneSpace::new(vec![GeneBound::new(3, 7).unwrap(); 50]).unwrap();
    let mut rng = RandomNumberGenerator::from_seed(8);
    let mut chromosome = space.random_chromosome(&mut rng);

    for _ in 0..20 {
        chromosome.mutate(&space, 0.5, &mut rng);
        assert!(space.check(&chromosome).is_ok());
    }
}
