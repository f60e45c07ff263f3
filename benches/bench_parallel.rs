use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use timetable_ga::{
    chromosome::{Chromosome, GeneBound, GeneSpace},
    evolution::{FnChallenge, Population},
    rng::RandomNumberGenerator,
};

// Quadratic conflict count, heavy enough for the pool to pay off
fn conflicts(chromosome: &Chromosome) -> f64 {
    let genes = chromosome.genes();
    let mut count = 0usize;
    for i in 0..genes.len() {
        for j in (i + 1)..genes.len() {
            if genes[i] == genes[j] {
                count += 1;
            }
        }
    }
    1.0 / (count as f64 + 1e-9)
}

fn bench_fitness_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("fitness_evaluation");
    let challenge = FnChallenge::new(conflicts);
    let space = GeneSpace::new(vec![GeneBound::upto(45).unwrap(); 120]).unwrap();
    let mut rng = RandomNumberGenerator::from_seed(3);

    // Test with different population sizes
    for size in [10, 100, 1000, 10000].iter() {
        let chromosomes: Vec<Chromosome> = (0..*size)
            .map(|_| space.random_chromosome(&mut rng))
            .collect();

        group.bench_with_input(
            BenchmarkId::new("sequential", size),
            &chromosomes,
            |b, chromosomes| {
                b.iter(|| {
                    Population::evaluate(black_box(chromosomes.clone()), &challenge, usize::MAX)
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("parallel", size),
            &chromosomes,
            |b, chromosomes| {
                b.iter(|| Population::evaluate(black_box(chromosomes.clone()), &challenge, 1))
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_fitness_evaluation);
criterion_main!(benches);
