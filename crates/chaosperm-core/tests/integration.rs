//! Integration tests for chaosperm-core.
//!
//! These tests exercise the full generation pipeline:
//! registry lookup → generator → warm-up → sampling → rank transform.

use chaosperm_core::{
    Divergence, EvaluationConfig, MAP_NAMES, Permutation, PermutationGenerator, Seed, all_maps,
    map_by_name, random_seeds, rank_transform,
};
use proptest::prelude::*;

fn assert_bijection(p: &Permutation) {
    let mut sorted = p.as_slice().to_vec();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..p.len()).collect::<Vec<_>>());
}

#[test]
fn every_map_produces_bijections() {
    for map in all_maps() {
        let name = map.name();
        let generator = PermutationGenerator::new(map);
        for seed in random_seeds(5, Some(11)) {
            let p = generator.generate(seed, 1000, 128).unwrap();
            assert_eq!(p.len(), 128, "{name}");
            assert_bijection(&p);
        }
    }
}

#[test]
fn every_map_is_deterministic() {
    for name in MAP_NAMES {
        let a = map_by_name(name, None, Divergence::Reseed).unwrap();
        let b = map_by_name(name, None, Divergence::Reseed).unwrap();
        let seed = Seed::new(0.271, 0.314);
        assert_eq!(
            PermutationGenerator::new(a).generate(seed, 1000, 100).unwrap(),
            PermutationGenerator::new(b).generate(seed, 1000, 100).unwrap(),
            "{name} is not deterministic"
        );
    }
}

#[test]
fn chaotic_maps_do_not_collapse_to_identity() {
    let generator = PermutationGenerator::new(map_by_name("logistic", None, Divergence::Reseed).unwrap());
    let p = generator.generate(Seed::new(0.3, 0.3), 1000, 100).unwrap();
    assert!(!p.is_identity());
}

#[test]
fn distinct_seeds_give_distinct_permutations() {
    let generator = EvaluationConfig::default().build_generator().unwrap();
    let a = generator.generate(Seed::new(0.11, 0.0), 1000, 100).unwrap();
    let b = generator.generate(Seed::new(0.12, 0.0), 1000, 100).unwrap();
    assert_ne!(a, b);
}

#[test]
fn parallel_batch_equals_sequential() {
    let config = EvaluationConfig {
        map: "henon".into(),
        seeds: 64,
        rng_seed: Some(3),
        n: 50,
        warmup: 300,
        ..Default::default()
    };
    let generator = config.build_generator().unwrap();
    let seeds = config.draw_seeds();
    let batch = generator.generate_batch(&seeds, config.warmup, config.n).unwrap();
    let sequential: Vec<_> = seeds
        .iter()
        .map(|&s| generator.generate(s, config.warmup, config.n).unwrap())
        .collect();
    assert_eq!(batch, sequential);
}

proptest! {
    #[test]
    fn rank_transform_is_always_a_bijection(values in prop::collection::vec(any::<f64>(), 1..200)) {
        let p = rank_transform(&values);
        let mut sorted = p.as_slice().to_vec();
        sorted.sort_unstable();
        prop_assert_eq!(sorted, (0..values.len()).collect::<Vec<_>>());
    }

    #[test]
    fn rank_transform_orders_finite_values(values in prop::collection::vec(-1e6f64..1e6, 1..100)) {
        let p = rank_transform(&values);
        for i in 0..values.len() {
            for j in 0..values.len() {
                if values[i] < values[j] {
                    prop_assert!(p.as_slice()[i] < p.as_slice()[j]);
                }
            }
        }
    }

    #[test]
    fn generator_output_is_bijection(
        x0 in 0.0f64..1.0,
        y0 in 0.0f64..1.0,
        m in 0usize..200,
        n in 1usize..150,
        map_idx in 0usize..5,
    ) {
        let map = map_by_name(MAP_NAMES[map_idx], None, Divergence::Reseed).unwrap();
        let p = PermutationGenerator::new(map).generate(Seed::new(x0, y0), m, n).unwrap();
        prop_assert_eq!(p.len(), n);
        prop_assert!(Permutation::try_from_vec(p.into_vec()).is_ok());
    }
}
