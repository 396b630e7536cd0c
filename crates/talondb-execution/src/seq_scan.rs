//! Full-table scan, optionally filtered by a predicate expression.

use talondb_core::Rid;

use crate::catalog::TableInfo;
use crate::executor::Executor;
use crate::expression::Expression;
use crate::tuple::{Schema, Tuple, Value};

/// Scans every live (non-deleted) row of a table, skipping rows where the
/// optional `filter_predicate` evaluates to `false` or `NULL`.
pub struct SeqScanExecutor<'a> {
    table: &'a TableInfo,
    filter_predicate: Option<Expression>,
    pos: usize,
}

impl<'a> SeqScanExecutor<'a> {
    #[must_use]
    pub fn new(table: &'a TableInfo, filter_predicate: Option<Expression>) -> Self {
        Self {
            table,
            filter_predicate,
            pos: 0,
        }
    }

    fn passes_filter(&self, tuple: &Tuple) -> bool {
        match &self.filter_predicate {
            None => true,
            Some(predicate) => match predicate.evaluate(tuple) {
                Value::Boolean(keep) => keep,
                Value::Null => false,
                _ => {
                    debug_assert!(false, "filter predicate must evaluate to a boolean");
                    false
                }
            },
        }
    }
}

impl Executor for SeqScanExecutor<'_> {
    fn init(&mut self) {
        self.pos = 0;
    }

    fn next(&mut self) -> Option<(Tuple, Rid)> {
        loop {
            let heap = self.table.heap.borrow();
            let (meta, tuple, rid) = heap.make_iterator().nth(self.pos)?;
            self.pos += 1;
            if meta.is_deleted {
                continue;
            }
            drop(heap);
            if !self.passes_filter(&tuple) {
                continue;
            }
            return Some((tuple, rid));
        }
    }

    fn output_schema(&self) -> &Schema {
        &self.table.schema
    }
}
