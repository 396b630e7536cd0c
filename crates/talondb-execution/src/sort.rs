//! Materializing sort: drains its child at `init()`, orders the result by
//! one or more expressions, then replays it.

use talondb_core::Rid;

use crate::executor::Executor;
use crate::expression::Expression;
use crate::tuple::{compare_values, Schema, Tuple};

/// A sort key: the expression to evaluate and whether it sorts descending.
pub struct OrderBy {
    pub expression: Expression,
    pub descending: bool,
}

/// Sorts its child's output by a sequence of [`OrderBy`] keys, each one
/// breaking ties left by the previous. Unordered (`None`) comparisons —
/// mismatched types, or either side `NULL` — are treated as equal, so
/// sorting falls through to the next key.
pub struct SortExecutor<'a> {
    child: Box<dyn Executor + 'a>,
    order_bys: Vec<OrderBy>,
    rows: Vec<(Tuple, Rid)>,
    pos: usize,
}

impl<'a> SortExecutor<'a> {
    #[must_use]
    pub fn new(child: Box<dyn Executor + 'a>, order_bys: Vec<OrderBy>) -> Self {
        Self {
            child,
            order_bys,
            rows: Vec::new(),
            pos: 0,
        }
    }
}

impl Executor for SortExecutor<'_> {
    fn init(&mut self) {
        self.child.init();
        self.rows.clear();
        while let Some(row) = self.child.next() {
            self.rows.push(row);
        }

        self.rows.sort_by(|(a, _), (b, _)| {
            for order_by in &self.order_bys {
                let left = order_by.expression.evaluate(a);
                let right = order_by.expression.evaluate(b);
                match compare_values(&left, &right) {
                    Some(ordering) if ordering.is_ne() => {
                        return if order_by.descending { ordering.reverse() } else { ordering };
                    }
                    _ => continue,
                }
            }
            std::cmp::Ordering::Equal
        });
        self.pos = 0;
    }

    fn next(&mut self) -> Option<(Tuple, Rid)> {
        let row = self.rows.get(self.pos)?.clone();
        self.pos += 1;
        Some(row)
    }

    fn output_schema(&self) -> &Schema {
        self.child.output_schema()
    }
}
