//! The table heap: the tuple storage every executor ultimately reads from
//! or writes to. In-memory only — there is no buffer pool or page layer
//! here, so `page_id` is always `0` and `slot` is the row's index.

use talondb_core::Rid;

use crate::tuple::Tuple;

/// Per-tuple bookkeeping the heap tracks alongside the tuple's values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TupleMeta {
    pub is_deleted: bool,
}

/// A table's row storage. Kept as a trait so executors depend on the
/// interface rather than the in-memory representation, matching the
/// abstract-iterator/abstract-executor split the rest of the pipeline
/// uses.
pub trait TableHeap {
    /// Appends `tuple` to the heap, returning the [`Rid`] it was assigned,
    /// or `None` if the heap has no room left for another row.
    fn insert_tuple(&mut self, meta: TupleMeta, tuple: Tuple) -> Option<Rid>;

    /// An iterator over every row currently in the heap, including
    /// logically deleted ones — callers filter those out themselves, the
    /// same way [`crate::seq_scan::SeqScanExecutor`] does.
    fn make_iterator(&self) -> TableIterator<'_>;
}

/// A `Vec`-backed [`TableHeap`]. Rows are never physically removed;
/// deletion is represented by [`TupleMeta::is_deleted`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryTableHeap {
    rows: Vec<(TupleMeta, Tuple)>,
}

impl InMemoryTableHeap {
    #[must_use]
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl TableHeap for InMemoryTableHeap {
    fn insert_tuple(&mut self, meta: TupleMeta, tuple: Tuple) -> Option<Rid> {
        let slot = self.rows.len();
        let slot = u32::try_from(slot).ok()?;
        self.rows.push((meta, tuple));
        Some(Rid::new(0, slot))
    }

    fn make_iterator(&self) -> TableIterator<'_> {
        TableIterator { rows: &self.rows, pos: 0 }
    }
}

/// Sequential iterator over a [`TableHeap`]'s rows, yielding each row's
/// metadata, tuple, and assigned [`Rid`] in insertion order.
pub struct TableIterator<'a> {
    rows: &'a [(TupleMeta, Tuple)],
    pos: usize,
}

impl Iterator for TableIterator<'_> {
    type Item = (TupleMeta, Tuple, Rid);

    fn next(&mut self) -> Option<Self::Item> {
        let (meta, tuple) = self.rows.get(self.pos)?;
        let rid = Rid::new(0, u32::try_from(self.pos).ok()?);
        self.pos += 1;
        Some((*meta, tuple.clone(), rid))
    }
}
