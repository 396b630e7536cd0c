//! Drains its child, inserting every row into a table and fanning each
//! inserted row's indexed vector column out to every vector index
//! registered on that table. Emits a single summary row: the count of
//! tuples inserted.

use talondb_core::Rid;

use crate::catalog::{IndexInfo, TableInfo};
use crate::executor::Executor;
use crate::table::TupleMeta;
use crate::tuple::{Column, DataType, Schema, Tuple, Value};

/// Inserts rows produced by `child` into `table`, updating `indexes`
/// along the way.
pub struct InsertExecutor<'a> {
    child: Box<dyn Executor + 'a>,
    table: &'a TableInfo,
    indexes: &'a [IndexInfo],
    output_schema: Schema,
    inserted: i64,
    emitted: bool,
}

impl<'a> InsertExecutor<'a> {
    #[must_use]
    pub fn new(child: Box<dyn Executor + 'a>, table: &'a TableInfo, indexes: &'a [IndexInfo]) -> Self {
        Self {
            child,
            table,
            indexes,
            output_schema: Schema::new(vec![Column::new("insert_count", DataType::Integer)]),
            inserted: 0,
            emitted: false,
        }
    }
}

impl Executor for InsertExecutor<'_> {
    fn init(&mut self) {
        self.child.init();
        self.inserted = 0;

        while let Some((tuple, _)) = self.child.next() {
            let mut heap = self.table.heap.borrow_mut();
            let insert_rid = heap.insert_tuple(TupleMeta::default(), tuple.clone());
            drop(heap);

            let Some(rid) = insert_rid else {
                continue;
            };
            self.inserted += 1;

            for index_info in self.indexes {
                match tuple.get_value(index_info.key_column) {
                    Value::Vector(vector) => {
                        index_info.index.borrow_mut().insert_vector_entry(vector.clone(), rid);
                    }
                    _ => debug_assert!(false, "index key column is not a vector"),
                }
            }
        }

        self.emitted = false;
        tracing::debug!(count = self.inserted, table = %self.table.name, "insert executor complete");
    }

    fn next(&mut self) -> Option<(Tuple, Rid)> {
        if self.emitted {
            return None;
        }
        self.emitted = true;
        Some((Tuple::new(vec![Value::Integer(self.inserted)]), Rid::new(0, 0)))
    }

    fn output_schema(&self) -> &Schema {
        &self.output_schema
    }
}
