//! The catalog: the map from table/index names to their live storage,
//! shared (via `RefCell`, since this engine is single-threaded) across an
//! entire query's executor tree.

use std::cell::RefCell;
use std::collections::HashMap;

use talondb_index::VectorIndex;

use crate::table::InMemoryTableHeap;
use crate::tuple::Schema;

/// A table's schema and row storage.
pub struct TableInfo {
    pub name: String,
    pub schema: Schema,
    pub heap: RefCell<InMemoryTableHeap>,
}

/// A vector index registered on one column of a table.
pub struct IndexInfo {
    pub name: String,
    /// Position of the indexed vector column in the owning table's schema.
    pub key_column: usize,
    pub index: RefCell<VectorIndex>,
}

/// Holds every table and its indexes for the lifetime of a query.
#[derive(Default)]
pub struct Catalog {
    tables: HashMap<String, TableInfo>,
    indexes: HashMap<String, Vec<IndexInfo>>,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new, empty table. Panics if a table with this name
    /// already exists, since re-registration is always a caller bug in
    /// this single-query-lifetime catalog.
    pub fn create_table(&mut self, name: impl Into<String>, schema: Schema) {
        let name = name.into();
        debug_assert!(!self.tables.contains_key(&name), "table {name} already registered");
        self.tables.insert(
            name.clone(),
            TableInfo {
                name,
                schema,
                heap: RefCell::new(InMemoryTableHeap::new()),
            },
        );
    }

    #[must_use]
    pub fn get_table(&self, name: &str) -> Option<&TableInfo> {
        self.tables.get(name)
    }

    /// Registers a vector index over `key_column` of `table_name`.
    pub fn create_index(&mut self, table_name: &str, index_name: impl Into<String>, key_column: usize, index: VectorIndex) {
        debug_assert!(self.tables.contains_key(table_name), "unknown table {table_name}");
        self.indexes.entry(table_name.to_string()).or_default().push(IndexInfo {
            name: index_name.into(),
            key_column,
            index: RefCell::new(index),
        });
    }

    /// All indexes registered on `table_name`, or an empty slice if none.
    #[must_use]
    pub fn get_table_indexes(&self, table_name: &str) -> &[IndexInfo] {
        self.indexes.get(table_name).map_or(&[], Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuple::{Column, DataType};

    #[test]
    fn new_table_has_no_indexes() {
        let mut catalog = Catalog::new();
        catalog.create_table("docs", Schema::new(vec![Column::new("id", DataType::Integer)]));
        assert!(catalog.get_table_indexes("docs").is_empty());
        assert!(catalog.get_table("docs").is_some());
    }

    #[test]
    fn unknown_table_lookup_returns_none() {
        let catalog = Catalog::new();
        assert!(catalog.get_table("missing").is_none());
    }
}
