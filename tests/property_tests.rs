//! Property-based tests for u-genopt
//!
//! Uses proptest to verify the invariants every completed run must satisfy.

use std::sync::Arc;

use proptest::prelude::*;
use u_genopt::ga::{Bounds, Crossover, GeneticAlgorithm, Mutation, RunConfig, Selection};
use u_genopt::random::create_rng;
use u_genopt::target::{Multimodal, Polynomial, Quadratic, TargetFunction};
use u_genopt::{ConfigError, RunError};

fn selection_strategy() -> impl Strategy<Value = Selection> {
    prop_oneof![
        (1usize..6).prop_map(Selection::Tournament),
        Just(Selection::Roulette),
        Just(Selection::Rank),
    ]
}

fn crossover_strategy() -> impl Strategy<Value = Crossover> {
    prop_oneof![
        (0.0f64..1.0).prop_map(|alpha| Crossover::Blend { alpha }),
        Just(Crossover::Arithmetic),
        Just(Crossover::Uniform),
        Just(Crossover::SinglePoint),
    ]
}

fn target_strategy() -> impl Strategy<Value = Arc<dyn TargetFunction>> {
    prop_oneof![
        (1usize..4).prop_map(|d| Arc::new(Quadratic::with_dimension(d)) as Arc<dyn TargetFunction>),
        Just(Arc::new(Polynomial) as Arc<dyn TargetFunction>),
        (1usize..4).prop_map(|d| Arc::new(Multimodal::with_dimension(d)) as Arc<dyn TargetFunction>),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    // ==================== History Shape ====================

    #[test]
    fn history_has_expected_shape(
        target in target_strategy(),
        population_size in 2usize..16,
        max_generations in 1usize..8,
        cr in 0.0f64..=1.0,
        mr in 0.0f64..=1.0,
        mx in 0.0f64..2.0,
        selection in selection_strategy(),
        crossover in crossover_strategy(),
        seed in any::<u64>(),
    ) {
        let dimension = target.dimension();
        let config = RunConfig::new(target.clone())
            .with_population_size(population_size)
            .with_max_generations(max_generations)
            .with_crossover_rate(cr)
            .with_mutation_rate(mr)
            .with_mutation_magnitude(mx)
            .with_search_space(vec![2.0; dimension])
            .with_selection(selection)
            .with_crossover(crossover)
            .with_seed(seed);

        let history = GeneticAlgorithm::new().run(config).unwrap();

        prop_assert_eq!(history.len(), max_generations + 1);
        for (i, generation) in history.iter().enumerate() {
            prop_assert_eq!(generation.index(), i);
            prop_assert_eq!(generation.len(), population_size);
            for solution in generation.solutions() {
                prop_assert_eq!(solution.dimension(), dimension);
                prop_assert_eq!(Ok(solution.fitness()), target.evaluate(solution.genes()));
            }
        }
    }

    #[test]
    fn clamped_runs_stay_in_search_space(
        start in prop::collection::vec(-10.0f64..10.0, 2),
        space in prop::collection::vec(0.0f64..3.0, 2),
        seed in any::<u64>(),
    ) {
        let bounds = Bounds::around(&start, &space);
        let config = RunConfig::new(Arc::new(Multimodal::default()))
            .with_starting_values(start)
            .with_search_space(space)
            .with_mutation_rate(0.5)
            .with_mutation_magnitude(5.0)
            .with_max_generations(5)
            .with_seed(seed);

        let history = GeneticAlgorithm::new().run(config).unwrap();
        for generation in history.iter() {
            for solution in generation.solutions() {
                prop_assert!(bounds.contains(solution.genes()));
            }
        }
    }

    #[test]
    fn mismatched_starting_values_are_rejected(len in 0usize..6, seed in any::<u64>()) {
        prop_assume!(len != 2);
        let ga = GeneticAlgorithm::new();
        let config = RunConfig::new(Arc::new(Multimodal::default()))
            .with_starting_values(vec![0.0; len])
            .with_seed(seed);

        let err = ga.run(config).unwrap_err();
        prop_assert_eq!(
            err,
            RunError::Configuration(ConfigError::DimensionMismatch {
                field: "starting values",
                expected: 2,
                actual: len,
            })
        );
        prop_assert!(ga.generations().is_none());
    }

    // ==================== Mutation Gating ====================

    #[test]
    fn zero_rate_mutation_is_identity(
        genes in prop::collection::vec(-100.0f64..100.0, 1..10),
        magnitude in 0.0f64..10.0,
        seed in any::<u64>(),
    ) {
        let mut rng = create_rng(seed);
        let mut mutated = genes.clone();
        Mutation::Gaussian.apply(&mut mutated, 0.0, magnitude, None, &mut rng);
        prop_assert_eq!(mutated, genes);
    }

    #[test]
    fn zero_magnitude_mutation_is_identity(
        genes in prop::collection::vec(-100.0f64..100.0, 1..10),
        rate in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let mut rng = create_rng(seed);
        for mutation in [Mutation::Gaussian, Mutation::Uniform] {
            let mut mutated = genes.clone();
            mutation.apply(&mut mutated, rate, 0.0, None, &mut rng);
            prop_assert_eq!(&mutated, &genes);
        }
    }

    // ==================== Bounds ====================

    #[test]
    fn bounds_sample_within_box(
        start in prop::collection::vec(-50.0f64..50.0, 1..6),
        width in 0.0f64..20.0,
        seed in any::<u64>(),
    ) {
        let space = vec![width; start.len()];
        let bounds = Bounds::around(&start, &space);
        let mut rng = create_rng(seed);
        for _ in 0..10 {
            prop_assert!(bounds.contains(&bounds.sample(&mut rng)));
        }
    }
}
