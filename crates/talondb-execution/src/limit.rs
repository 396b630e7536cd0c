//! Caps its child's output at a fixed number of rows.

use talondb_core::Rid;

use crate::executor::Executor;
use crate::tuple::{Schema, Tuple};

/// Drains its child at `init()` and replays only the first `limit` rows.
pub struct LimitExecutor<'a> {
    child: Box<dyn Executor + 'a>,
    limit: usize,
    rows: Vec<(Tuple, Rid)>,
    pos: usize,
}

impl<'a> LimitExecutor<'a> {
    #[must_use]
    pub fn new(child: Box<dyn Executor + 'a>, limit: usize) -> Self {
        Self {
            child,
            limit,
            rows: Vec::new(),
            pos: 0,
        }
    }
}

impl Executor for LimitExecutor<'_> {
    fn init(&mut self) {
        self.child.init();
        self.rows.clear();
        while let Some(row) = self.child.next() {
            self.rows.push(row);
        }
        self.pos = 0;
    }

    fn next(&mut self) -> Option<(Tuple, Rid)> {
        if self.pos >= self.limit {
            return None;
        }
        let row = self.rows.get(self.pos)?.clone();
        self.pos += 1;
        Some(row)
    }

    fn output_schema(&self) -> &Schema {
        self.child.output_schema()
    }
}
