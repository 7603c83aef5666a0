//! Property-based tests for the embeddings, the nearest-anchor query and
//! the recovery pipeline.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated inputs.

use std::sync::{Arc, OnceLock};

use proptest::prelude::*;

use clocklattice::core::lattice::{LatticePoint, DIM};
use clocklattice::core::scalar::GroupOrder;
use clocklattice::curve::ToyCurve;
use clocklattice::embed::{scalar_to_lattice, slice_fractions, ClockProjector};
use clocklattice::engine::nearest::nearest_three;
use clocklattice::engine::Interrupt;
use clocklattice::{AnchorConfig, AnchorSet, BigScalar, Engine, SearchConfig};

fn anchors() -> &'static Arc<AnchorSet> {
    static ANCHORS: OnceLock<Arc<AnchorSet>> = OnceLock::new();
    ANCHORS.get_or_init(|| Arc::new(AnchorSet::build(&AnchorConfig::default()).unwrap()))
}

fn toy_engine() -> &'static Engine {
    static ENGINE: OnceLock<Engine> = OnceLock::new();
    ENGINE.get_or_init(|| {
        Engine::new(
            Arc::clone(anchors()),
            Arc::new(ToyCurve::medium()),
            SearchConfig::default(),
        )
        .unwrap()
    })
}

/// Strategy for arbitrary lattice points within a few σ of the origin.
fn lattice_point() -> impl Strategy<Value = LatticePoint> {
    prop::array::uniform13(-12.0f64..12.0).prop_map(LatticePoint::new)
}

fn ring_positions() -> impl Strategy<Value = [u32; 4]> {
    (0u32..12, 0u32..60, 0u32..60, 0u32..100).prop_map(|(a, b, c, d)| [a, b, c, d])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn scalar_embeddings_are_finite(bytes in prop::collection::vec(any::<u8>(), 32)) {
        let k = BigScalar::from_bytes_be(&bytes);
        let p = scalar_to_lattice(&k, 32);
        prop_assert!(p.is_finite());
        prop_assert_eq!(p.components().len(), DIM);
    }

    #[test]
    fn slices_are_unit_fractions(
        bytes in prop::collection::vec(any::<u8>(), 1..64),
        parts in 1usize..16,
    ) {
        let fractions = slice_fractions(&bytes, parts);
        prop_assert_eq!(fractions.len(), parts);
        for u in fractions {
            prop_assert!((0.0..=1.0).contains(&u));
        }
    }

    #[test]
    fn nearest_distances_are_sorted(query in lattice_point()) {
        let triple = nearest_three(anchors(), &query).unwrap();
        let [d1, d2, d3] = triple.distances;
        prop_assert!(d1 <= d2 && d2 <= d3);
        prop_assert!(d1 >= 0.0);
        prop_assert_ne!(triple.vertices[0], triple.vertices[1]);
        prop_assert_ne!(triple.vertices[1], triple.vertices[2]);
    }

    #[test]
    fn clock_reads_back_lifted_positions(positions in ring_positions()) {
        let clock = ClockProjector::new([12, 60, 60, 100], 42.0);
        let reading = clock.reading(&clock.lift(positions));
        prop_assert_eq!(reading.positions, positions);
    }

    #[test]
    fn modular_add_then_sub_is_identity(a in any::<u64>(), b in any::<u64>()) {
        let order = GroupOrder::from_u64(65_353, 64).unwrap();
        let a = BigScalar::from_u64(a).mod_n(&order);
        let b = BigScalar::from_u64(b).mod_n(&order);
        prop_assert_eq!(a.add(&b, &order).sub(&b, &order), a.clone());
        prop_assert!(order.contains(&a.add(&b, &order)));
    }

    #[test]
    fn hamming_distance_is_symmetric(a in any::<u64>(), b in any::<u64>()) {
        let a = BigScalar::from_u64(a);
        let b = BigScalar::from_u64(b);
        prop_assert_eq!(a.hamming_distance_bits(&b, 8), b.hamming_distance_bits(&a, 8));
        prop_assert_eq!(a.hamming_distance_bits(&a, 8), 0);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn toy_recovery_is_in_range_and_never_falsely_verified(k in 0u64..65_353) {
        let engine = toy_engine();
        let q = engine.curve().point_mul(&BigScalar::from_u64(k)).unwrap();
        let result = engine.recover(&q, None, &Interrupt::none()).unwrap();

        prop_assert!(engine.order().contains(&result.k_hat));
        prop_assert!((0.0..=1.0).contains(&result.confidence));
        let reconstructed = engine.curve().point_mul(&result.k_hat).unwrap();
        prop_assert_eq!(result.verified, engine.curve().equal(&reconstructed, &q));
        if !result.verified {
            prop_assert!(result.confidence <= 0.15);
        }
    }
}
