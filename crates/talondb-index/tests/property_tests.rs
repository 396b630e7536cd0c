//! Property-based invariant tests for the vector-index crate.
//!
//! Properties covered:
//! 1. Distance kernels are symmetric and non-negative, with zero
//!    self-distance for L2 and inner-product-on-identical-vectors.
//! 2. An `NswLayer`'s adjacency is always undirected.
//! 3. HNSW's vertex count tracks every inserted entry, and a scan never
//!    returns more than `limit` results, never duplicates a rid, and is
//!    sorted by ascending distance.
//! 4. IVFFlat never produces more lists than `min(lists, data.len())`,
//!    and its scans share the same top-k shape guarantees as HNSW's.

use std::collections::HashSet;
use std::ops::Range;

use proptest::prelude::*;

use talondb_core::{compute_distance, DistanceTag, Rid};
use talondb_index::nsw::NswLayer;
use talondb_index::{HnswIndex, HnswOptions, IvfFlatIndex, IvfFlatOptions};

fn finite_component() -> impl Strategy<Value = f64> {
    (-100i32..100i32).prop_map(|n| f64::from(n) / 10.0)
}

fn vector(dimension: usize) -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(finite_component(), dimension..=dimension)
}

fn dataset(dimension: usize, len: Range<usize>) -> impl Strategy<Value = Vec<(Vec<f64>, Rid)>> {
    proptest::collection::vec(vector(dimension), len).prop_map(|vectors| {
        vectors
            .into_iter()
            .enumerate()
            .map(|(i, v)| (v, Rid::new(0, i as u32)))
            .collect()
    })
}

proptest! {
    #[test]
    fn distance_is_symmetric(a in vector(4), b in vector(4)) {
        for tag in [DistanceTag::L2, DistanceTag::InnerProduct, DistanceTag::Cosine] {
            let ab = compute_distance(&a, &b, tag);
            let ba = compute_distance(&b, &a, tag);
            prop_assert!((ab - ba).abs() < 1e-9);
        }
    }

    #[test]
    fn l2_is_non_negative_and_zero_on_diagonal(a in vector(4)) {
        let d = compute_distance(&a, &a, DistanceTag::L2);
        prop_assert_eq!(d, 0.0);
        prop_assert!(d >= 0.0);
    }

    #[test]
    fn nsw_layer_adjacency_is_always_symmetric(
        edges in proptest::collection::vec((0usize..10, 0usize..10), 0..30)
    ) {
        let mut layer = NswLayer::new(DistanceTag::L2);
        for id in 0..10 {
            layer.add_vertex(id);
        }
        for (a, b) in edges {
            layer.connect(a, b);
        }
        for id in 0..10 {
            for &neighbor in layer.neighbors(id) {
                prop_assert!(layer.neighbors(neighbor).contains(&id));
            }
        }
    }

    #[test]
    fn hnsw_len_matches_inserted_count(data in dataset(3, 1..20), seed in any::<u64>()) {
        let options = HnswOptions { m: 4, ef_construction: 16, ef_search: 8 };
        let mut index = HnswIndex::new(3, DistanceTag::L2, options);
        index.build_index_seeded(&data, seed);
        prop_assert_eq!(index.len(), data.len());
    }

    #[test]
    fn hnsw_scan_respects_limit_and_ordering(
        data in dataset(3, 1..20),
        query in vector(3),
        limit in 1usize..10,
        seed in any::<u64>(),
    ) {
        let options = HnswOptions { m: 4, ef_construction: 16, ef_search: 8 };
        let mut index = HnswIndex::new(3, DistanceTag::L2, options);
        index.build_index_seeded(&data, seed);

        let result = index.scan_vector_key(&query, limit);
        prop_assert!(result.len() <= limit);
        prop_assert!(result.len() <= data.len());

        let mut seen = HashSet::new();
        for (rid, _) in &result {
            prop_assert!(seen.insert(*rid), "duplicate rid in scan result");
        }
        for pair in result.windows(2) {
            prop_assert!(pair[0].1 <= pair[1].1);
        }
    }

    #[test]
    fn ivfflat_list_count_never_exceeds_lists_or_data_len(
        data in dataset(3, 1..20),
        lists in 1usize..8,
        seed in any::<u64>(),
    ) {
        let options = IvfFlatOptions { lists, probe_lists: lists };
        let mut index = IvfFlatIndex::new(3, DistanceTag::L2, options);
        index.build_index_seeded(&data, seed);
        prop_assert!(index.list_count() <= lists);
        prop_assert!(index.list_count() <= data.len());
    }

    #[test]
    fn ivfflat_scan_respects_limit_and_ordering(
        data in dataset(3, 1..20),
        query in vector(3),
        lists in 1usize..6,
        limit in 1usize..10,
        seed in any::<u64>(),
    ) {
        let options = IvfFlatOptions { lists, probe_lists: lists };
        let mut index = IvfFlatIndex::new(3, DistanceTag::L2, options);
        index.build_index_seeded(&data, seed);

        let result = index.scan_vector_key(&query, limit);
        prop_assert!(result.len() <= limit);

        let mut seen = HashSet::new();
        for (rid, _) in &result {
            prop_assert!(seen.insert(*rid), "duplicate rid in scan result");
        }
        for pair in result.windows(2) {
            prop_assert!(pair[0].1 <= pair[1].1);
        }
    }

    #[test]
    fn build_index_seeded_is_reproducible_for_any_seed(data in dataset(3, 1..20), seed in any::<u64>()) {
        let options = HnswOptions { m: 4, ef_construction: 16, ef_search: 8 };
        let mut a = HnswIndex::new(3, DistanceTag::L2, options);
        a.build_index_seeded(&data, seed);
        let mut b = HnswIndex::new(3, DistanceTag::L2, options);
        b.build_index_seeded(&data, seed);
        prop_assert_eq!(a.scan_vector_key(&[0.0, 0.0, 0.0], 5), b.scan_vector_key(&[0.0, 0.0, 0.0], 5));
    }
}

#[test]
fn empty_hnsw_scan_returns_empty() {
    let options = HnswOptions { m: 4, ef_construction: 16, ef_search: 8 };
    let index = HnswIndex::new(3, DistanceTag::L2, options);
    assert!(index.scan_vector_key(&[0.0, 0.0, 0.0], 5).is_empty());
}

#[test]
fn empty_ivfflat_scan_returns_empty() {
    let options = IvfFlatOptions { lists: 4, probe_lists: 2 };
    let index = IvfFlatIndex::new(3, DistanceTag::L2, options);
    assert!(index.scan_vector_key(&[0.0, 0.0, 0.0], 5).is_empty());
}
