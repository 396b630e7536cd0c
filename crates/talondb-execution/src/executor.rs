//! The Volcano/pull-based executor interface every operator implements.
//!
//! Execution is entirely synchronous: `next()` returns as soon as a row
//! (or end-of-input) is available, with no suspension point and no
//! `async fn` anywhere in the tree. A single query runs to completion on
//! one thread before the next begins.

use talondb_core::Rid;

use crate::tuple::{Schema, Tuple};

/// One node of a physical query plan.
pub trait Executor {
    /// Prepares the executor to produce rows. Must be called exactly once
    /// before the first `next()` call, and recursively initializes any
    /// child executor.
    fn init(&mut self);

    /// Produces the next `(tuple, rid)` pair, or `None` once the executor
    /// is exhausted. Callers must not call `next()` again after it
    /// returns `None`.
    fn next(&mut self) -> Option<(Tuple, Rid)>;

    /// The schema of tuples this executor produces.
    fn output_schema(&self) -> &Schema;
}
