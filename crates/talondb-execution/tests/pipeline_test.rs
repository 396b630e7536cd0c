//! End-to-end executor-tree tests: insert rows, fan them out to a vector
//! index, then scan/sort/limit them back out.

use std::collections::HashMap;

use talondb_core::DistanceTag;
use talondb_execution::{
    Catalog, Column, DataType, Executor, Expression, InsertExecutor, LimitExecutor, OrderBy, Schema,
    SeqScanExecutor, SortExecutor, Tuple, Value, ValuesExecutor,
};
use talondb_index::VectorIndex;

fn docs_schema() -> Schema {
    Schema::new(vec![Column::new("id", DataType::Integer), Column::new("embedding", DataType::Vector(2))])
}

fn hnsw_options() -> HashMap<String, String> {
    [("m", "8"), ("ef_construction", "32"), ("ef_search", "16")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn ivfflat_options(lists: &str, probe_lists: &str) -> HashMap<String, String> {
    [("lists", lists), ("probe_lists", probe_lists)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn hnsw_exact_match_ranks_first() {
    let mut catalog = Catalog::new();
    catalog.create_table("docs", docs_schema());
    let index = VectorIndex::new_hnsw(2, DistanceTag::L2, &hnsw_options()).unwrap();
    catalog.create_index("docs", "docs_embedding_idx", 1, index);

    {
        let table = catalog.get_table("docs").unwrap();
        let indexes = catalog.get_table_indexes("docs");
        let rows = vec![
            Tuple::new(vec![Value::Integer(1), Value::Vector(vec![1.0, 0.0])]),
            Tuple::new(vec![Value::Integer(2), Value::Vector(vec![0.0, 1.0])]),
            Tuple::new(vec![Value::Integer(3), Value::Vector(vec![5.0, 5.0])]),
        ];
        let child = ValuesExecutor::new(docs_schema(), rows);
        let mut insert = InsertExecutor::new(Box::new(child), table, indexes);
        insert.init();
        assert_eq!(insert.next().unwrap().0.get_value(0), &Value::Integer(3));
    }

    let indexes = catalog.get_table_indexes("docs");
    let result = indexes[0].index.borrow().scan_vector_key(&[1.0, 0.0], 1);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].1, 0.0);
}

#[test]
fn sort_by_vector_distance_then_limit_returns_nearest_k() {
    let mut catalog = Catalog::new();
    catalog.create_table("docs", docs_schema());
    {
        let table = catalog.get_table("docs").unwrap();
        let rows = vec![
            Tuple::new(vec![Value::Integer(1), Value::Vector(vec![5.0, 5.0])]),
            Tuple::new(vec![Value::Integer(2), Value::Vector(vec![1.0, 0.0])]),
            Tuple::new(vec![Value::Integer(3), Value::Vector(vec![0.0, 1.0])]),
        ];
        let child = ValuesExecutor::new(docs_schema(), rows);
        let mut insert = InsertExecutor::new(Box::new(child), table, &[]);
        insert.init();
        insert.next();
    }

    let table = catalog.get_table("docs").unwrap();
    let scan = SeqScanExecutor::new(table, None);
    let sort = SortExecutor::new(
        Box::new(scan),
        vec![OrderBy {
            expression: Expression::VectorDistance {
                column: 1,
                target: vec![0.0, 0.0],
                distance_tag: DistanceTag::L2,
            },
            descending: false,
        }],
    );
    let mut limit = LimitExecutor::new(Box::new(sort), 2);
    limit.init();

    let mut ids = Vec::new();
    while let Some((tuple, _)) = limit.next() {
        ids.push(tuple.get_value(0).clone());
    }
    assert_eq!(ids, vec![Value::Integer(2), Value::Integer(3)]);
}

#[test]
fn ivfflat_probe_lists_bounds_coverage() {
    let mut catalog = Catalog::new();
    catalog.create_table("docs", docs_schema());

    // First, populate the table with no index attached yet (mirrors
    // `CREATE INDEX` running over pre-existing rows rather than an
    // empty table).
    {
        let table = catalog.get_table("docs").unwrap();
        let rows = vec![
            Tuple::new(vec![Value::Integer(1), Value::Vector(vec![0.0, 0.0])]),
            Tuple::new(vec![Value::Integer(2), Value::Vector(vec![0.1, 0.0])]),
            Tuple::new(vec![Value::Integer(3), Value::Vector(vec![10.0, 10.0])]),
            Tuple::new(vec![Value::Integer(4), Value::Vector(vec![10.1, 10.0])]),
        ];
        let child = ValuesExecutor::new(docs_schema(), rows);
        let mut insert = InsertExecutor::new(Box::new(child), table, &[]);
        insert.init();
        insert.next();
    }

    // Build the index from the table's current contents.
    let table = catalog.get_table("docs").unwrap();
    let mut scan = SeqScanExecutor::new(table, None);
    scan.init();
    let mut entries = Vec::new();
    while let Some((tuple, rid)) = scan.next() {
        match tuple.get_value(1) {
            Value::Vector(v) => entries.push((v.clone(), rid)),
            _ => unreachable!(),
        }
    }

    let mut index = VectorIndex::new_ivfflat(2, DistanceTag::L2, &ivfflat_options("2", "1")).unwrap();
    index.build_index(&entries);

    let probed = index.scan_vector_key(&[0.0, 0.0], 10);
    assert!(probed.len() <= 2, "probing a single list should not surface the far cluster");
}

#[test]
fn index_options_validation_surfaces_invalid_options_error() {
    let hnsw_missing_ef_search: HashMap<String, String> =
        [("m", "8"), ("ef_construction", "32")].into_iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    assert!(VectorIndex::new_hnsw(2, DistanceTag::L2, &hnsw_missing_ef_search).is_err());

    let ivfflat_bad_probe = ivfflat_options("2", "5");
    assert!(VectorIndex::new_ivfflat(2, DistanceTag::L2, &ivfflat_bad_probe).is_err());
}
