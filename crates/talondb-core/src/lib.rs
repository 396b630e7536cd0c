//! Core domain types shared by the vector-index and executor crates.
//!
//! This crate carries only what sits below both layers: the row identifier
//! handed out by the table heap, the distance-function tags and kernels,
//! and the error type index construction can fail with.

pub mod distance;
pub mod error;
pub mod rid;

pub use distance::{compute_distance, DistanceTag};
pub use error::{IndexError, IndexResult};
pub use rid::Rid;
