//! The Volcano-style executor tree that feeds and scans vector indexes:
//! table heap and catalog, tuples/schemas/expressions, and the
//! `Values` / `SeqScan` / `Sort` / `Limit` / `Insert` operators.

pub mod catalog;
pub mod executor;
pub mod expression;
pub mod insert;
pub mod limit;
pub mod seq_scan;
pub mod sort;
pub mod table;
pub mod tuple;
pub mod values;

pub use catalog::{Catalog, IndexInfo, TableInfo};
pub use executor::Executor;
pub use expression::Expression;
pub use insert::InsertExecutor;
pub use limit::LimitExecutor;
pub use seq_scan::SeqScanExecutor;
pub use sort::{OrderBy, SortExecutor};
pub use table::{InMemoryTableHeap, TableHeap, TableIterator, TupleMeta};
pub use tuple::{compare_values, Column, DataType, Schema, Tuple, Value};
pub use values::ValuesExecutor;
