//! HNSW (Hierarchical Navigable Small World) index.
//!
//! This build keeps a single base layer only (layer 0) rather than the
//! full multi-level skip-list-of-graphs structure. The single layer is
//! still an `NswLayer`, so promoting this to multiple levels later only
//! means growing `layers` and adding the level-assignment draw; the
//! per-layer algorithm itself does not change.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng, SeedableRng};

use talondb_core::{compute_distance, DistanceTag, Rid};

use crate::nsw::NswLayer;
use crate::types::HnswOptions;

/// An HNSW vector index over a fixed-dimension vector space.
#[derive(Debug, Clone)]
pub struct HnswIndex {
    dimension: usize,
    distance_tag: DistanceTag,
    options: HnswOptions,
    vertices: Vec<Vec<f64>>,
    rids: Vec<Rid>,
    layers: Vec<NswLayer>,
}

impl HnswIndex {
    /// Creates an empty HNSW index for `dimension`-length vectors.
    #[must_use]
    pub fn new(dimension: usize, distance_tag: DistanceTag, options: HnswOptions) -> Self {
        Self {
            dimension,
            distance_tag,
            options,
            vertices: Vec::new(),
            rids: Vec::new(),
            layers: vec![NswLayer::new(distance_tag)],
        }
    }

    /// The fixed dimensionality this index was built for.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// The number of vectors currently indexed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the index holds no vectors yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Bulk-loads `entries`, inserting them in a randomly shuffled order so
    /// the resulting graph isn't biased by the input's original ordering.
    /// Draws from a fresh, non-deterministic seed on every call.
    pub fn build_index(&mut self, entries: &[(Vec<f64>, Rid)]) {
        self.build_index_with_rng(entries, &mut thread_rng());
    }

    /// Same as `build_index`, but shuffles with `seed` instead of a fresh
    /// non-deterministic source, so the resulting graph is reproducible
    /// across runs. Intended for tests that need a deterministic build.
    pub fn build_index_seeded(&mut self, entries: &[(Vec<f64>, Rid)], seed: u64) {
        self.build_index_with_rng(entries, &mut StdRng::seed_from_u64(seed));
    }

    fn build_index_with_rng(&mut self, entries: &[(Vec<f64>, Rid)], rng: &mut impl Rng) {
        let span = tracing::debug_span!("hnsw_build_index", count = entries.len());
        let _guard = span.enter();

        let mut order: Vec<usize> = (0..entries.len()).collect();
        order.shuffle(rng);
        for idx in order {
            let (vector, rid) = entries[idx].clone();
            self.insert_vector_entry(vector, rid);
        }
        tracing::debug!(indexed = self.len(), "hnsw build_index complete");
    }

    /// Inserts a single `(vector, rid)` pair, wiring the new vertex into
    /// the base layer's graph.
    ///
    /// # Panics
    ///
    /// Panics (via `debug_assert!`) if `vector.len() != self.dimension()`.
    pub fn insert_vector_entry(&mut self, vector: Vec<f64>, rid: Rid) {
        debug_assert_eq!(
            vector.len(),
            self.dimension,
            "vector dimensionality does not match index"
        );

        let id = self.vertices.len();
        self.vertices.push(vector);
        self.rids.push(rid);

        let vertex = self.vertices[id].clone();
        self.layers[0].insert(&self.vertices, &vertex, id, self.options.m);

        tracing::debug!(id, %rid, "hnsw insert_vector_entry");
    }

    /// Returns up to `limit` `(rid, distance)` pairs nearest to `query`,
    /// sorted by ascending distance. Returns an empty vector if the index
    /// is empty or `limit == 0`.
    ///
    /// `ef_search` is the configured candidate width; greedy search here
    /// always uses `limit` as the requested result count per the base
    /// `NswLayer::find_nearest_neighbors` contract; a future multi-layer
    /// walk would use `ef_search` to widen the candidate set at the base
    /// layer before trimming to `limit`.
    ///
    /// # Panics
    ///
    /// Panics (via `debug_assert!`) if `query.len() != self.dimension()`.
    #[must_use]
    pub fn scan_vector_key(&self, query: &[f64], limit: usize) -> Vec<(Rid, f64)> {
        let span = tracing::debug_span!("hnsw_scan_vector_key", limit, indexed = self.len());
        let _guard = span.enter();

        debug_assert_eq!(
            query.len(),
            self.dimension,
            "query dimensionality does not match index"
        );

        if self.is_empty() || limit == 0 {
            tracing::debug!(returned = 0, "hnsw scan_vector_key complete");
            return Vec::new();
        }

        let effective_limit = limit.max(self.options.ef_search).min(self.len());
        let entry = self.layers[0].in_vertices()[0];
        let mut ids = self.layers[0].find_nearest_neighbors(&self.vertices, query, effective_limit, entry);
        ids.truncate(limit);

        let results: Vec<(Rid, f64)> = ids
            .into_iter()
            .map(|id| {
                let dist = compute_distance(&self.vertices[id], query, self.distance_tag);
                (self.rids[id], dist)
            })
            .collect();

        tracing::debug!(returned = results.len(), "hnsw scan_vector_key complete");
        results
    }
}
