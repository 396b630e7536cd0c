//! Vector index implementations: HNSW and IVFFlat, behind one façade.
//!
//! - [`nsw`] — the single-layer navigable small world graph HNSW builds on.
//! - [`hnsw`] — the HNSW index itself.
//! - [`ivfflat`] — the inverted-file flat index.
//! - [`facade`] — [`VectorIndex`], the entry point callers use.
//! - [`types`] — the per-kind DDL option maps.

pub mod facade;
pub mod hnsw;
pub mod ivfflat;
pub mod nsw;
pub mod types;

pub use facade::VectorIndex;
pub use hnsw::HnswIndex;
pub use ivfflat::IvfFlatIndex;
pub use nsw::NswLayer;
pub use types::{HnswOptions, IvfFlatOptions};
