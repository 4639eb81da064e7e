//! Criterion benchmarks for the u-genopt engine.
//!
//! Runs the generational loop on each built-in target to measure pure
//! engine overhead at a few population/generation sizes.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_genopt::ga::{GeneticAlgorithm, RunConfig};
use u_genopt::target::{Multimodal, Polynomial, Quadratic, TargetFunction};

fn bench_targets(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_targets");
    group.sample_size(10);

    let targets: [Arc<dyn TargetFunction>; 3] = [
        Arc::new(Quadratic::with_dimension(10)),
        Arc::new(Polynomial),
        Arc::new(Multimodal::with_dimension(10)),
    ];

    for target in targets {
        for (pop, gen) in [(50usize, 50usize), (100, 100)] {
            let dimension = target.dimension();
            let config = RunConfig::new(target.clone())
                .with_population_size(pop)
                .with_max_generations(gen)
                .with_mutation_rate(0.1)
                .with_search_space(vec![5.0; dimension])
                .with_seed(42);
            group.bench_with_input(
                BenchmarkId::new(target.name().to_string(), format!("p{pop}_g{gen}")),
                &config,
                |b, config| {
                    let ga = GeneticAlgorithm::new();
                    b.iter(|| {
                        let history = ga.run(black_box(config.clone()));
                        black_box(history)
                    })
                },
            );
        }
    }
    group.finish();
}

fn bench_parallel_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_parallel");
    group.sample_size(10);

    for parallel in [false, true] {
        let config = RunConfig::new(Arc::new(Multimodal::with_dimension(50)))
            .with_population_size(200)
            .with_max_generations(20)
            .with_search_space(vec![5.12; 50])
            .with_parallel(parallel)
            .with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(parallel), &config, |b, config| {
            let ga = GeneticAlgorithm::new();
            b.iter(|| black_box(ga.run(black_box(config.clone()))))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_targets, bench_parallel_evaluation);
criterion_main!(benches);
