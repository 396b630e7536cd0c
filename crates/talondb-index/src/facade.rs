//! `VectorIndex`: the single entry point callers use regardless of which
//! index kind backs a given vector column.
//!
//! Implemented as a plain two-variant enum rather than a `dyn Trait`
//! object: there are exactly two index kinds in this system and no plan
//! to add a third without revisiting the whole design, so the added
//! indirection and `Any`-downcasting a trait object would need buys
//! nothing here.

use std::collections::HashMap;

use talondb_core::{DistanceTag, IndexError, IndexResult, Rid};

use crate::hnsw::HnswIndex;
use crate::ivfflat::IvfFlatIndex;
use crate::types::{HnswOptions, IvfFlatOptions};

/// A vector index, backed by either HNSW or IVFFlat.
#[derive(Debug, Clone)]
pub enum VectorIndex {
    Hnsw(HnswIndex),
    IvfFlat(IvfFlatIndex),
}

impl VectorIndex {
    /// Builds an HNSW-backed index, validating `options` against the
    /// `m` / `ef_construction` / `ef_search` DDL keys.
    pub fn new_hnsw(
        dimension: usize,
        distance_tag: DistanceTag,
        options: &HashMap<String, String>,
    ) -> IndexResult<Self> {
        let opts = HnswOptions::from_map(options).map_err(log_invalid_options)?;
        Ok(Self::Hnsw(HnswIndex::new(dimension, distance_tag, opts)))
    }

    /// Builds an IVFFlat-backed index, validating `options` against the
    /// `lists` / `probe_lists` DDL keys.
    pub fn new_ivfflat(
        dimension: usize,
        distance_tag: DistanceTag,
        options: &HashMap<String, String>,
    ) -> IndexResult<Self> {
        let opts = IvfFlatOptions::from_map(options).map_err(log_invalid_options)?;
        Ok(Self::IvfFlat(IvfFlatIndex::new(dimension, distance_tag, opts)))
    }

    /// The fixed dimensionality this index was built for.
    #[must_use]
    pub fn dimension(&self) -> usize {
        match self {
            Self::Hnsw(index) => index.dimension(),
            Self::IvfFlat(index) => index.dimension(),
        }
    }

    /// Whether the index holds no vectors (or, for IVFFlat, no centroids)
    /// yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Hnsw(index) => index.is_empty(),
            Self::IvfFlat(index) => index.is_empty(),
        }
    }

    /// Bulk-loads `entries` into the index.
    pub fn build_index(&mut self, entries: &[(Vec<f64>, Rid)]) {
        match self {
            Self::Hnsw(index) => index.build_index(entries),
            Self::IvfFlat(index) => index.build_index(entries),
        }
    }

    /// Same as `build_index`, but deterministic: shuffles/seeds with `seed`
    /// instead of a fresh non-deterministic source. Intended for tests that
    /// need a reproducible build.
    pub fn build_index_seeded(&mut self, entries: &[(Vec<f64>, Rid)], seed: u64) {
        match self {
            Self::Hnsw(index) => index.build_index_seeded(entries, seed),
            Self::IvfFlat(index) => index.build_index_seeded(entries, seed),
        }
    }

    /// Inserts a single `(vector, rid)` pair.
    pub fn insert_vector_entry(&mut self, vector: Vec<f64>, rid: Rid) {
        match self {
            Self::Hnsw(index) => index.insert_vector_entry(vector, rid),
            Self::IvfFlat(index) => index.insert_vector_entry(vector, rid),
        }
    }

    /// Returns up to `limit` `(rid, distance)` pairs nearest to `query`,
    /// sorted by ascending distance. Wraps the dispatch in a single span so
    /// callers see one `scan_vector_key` trace regardless of which variant
    /// answers it; each variant still emits its own completion event with
    /// its own row-count fields.
    #[must_use]
    pub fn scan_vector_key(&self, query: &[f64], limit: usize) -> Vec<(Rid, f64)> {
        let span = tracing::debug_span!("vector_index_scan_vector_key", limit);
        let _guard = span.enter();

        match self {
            Self::Hnsw(index) => index.scan_vector_key(query, limit),
            Self::IvfFlat(index) => index.scan_vector_key(query, limit),
        }
    }
}

fn log_invalid_options(err: IndexError) -> IndexError {
    tracing::error!(%err, "vector index options failed validation");
    err
}
