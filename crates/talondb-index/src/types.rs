//! Index option maps: the DDL-level key/value pairs each index kind accepts,
//! parsed and validated once at construction time.

use std::collections::HashMap;

use talondb_core::{IndexError, IndexResult};

/// Validated HNSW construction/search parameters.
///
/// `m` bounds both the graph's out-degree and, per the resolved design note
/// on insertion candidate width, the number of candidates considered while
/// wiring a freshly inserted vertex (the source uses `m`, not
/// `ef_construction`, for that search — this type keeps `ef_construction`
/// only because the DDL surface accepts it, not because the graph consults
/// it).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HnswOptions {
    pub m: usize,
    pub ef_construction: usize,
    pub ef_search: usize,
}

impl HnswOptions {
    /// Parses and validates an HNSW option map. All three keys are
    /// required and must be positive integers.
    pub fn from_map(map: &HashMap<String, String>) -> IndexResult<Self> {
        let m = parse_positive(map, "m")?;
        let ef_construction = parse_positive(map, "ef_construction")?;
        let ef_search = parse_positive(map, "ef_search")?;
        Ok(Self {
            m,
            ef_construction,
            ef_search,
        })
    }
}

/// Validated IVFFlat construction/search parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IvfFlatOptions {
    pub lists: usize,
    pub probe_lists: usize,
}

impl IvfFlatOptions {
    /// Parses and validates an IVFFlat option map. `probe_lists` must not
    /// exceed `lists`.
    pub fn from_map(map: &HashMap<String, String>) -> IndexResult<Self> {
        let lists = parse_positive(map, "lists")?;
        let probe_lists = parse_positive(map, "probe_lists")?;
        if probe_lists > lists {
            return Err(IndexError::invalid_options(format!(
                "probe_lists ({probe_lists}) must not exceed lists ({lists})"
            )));
        }
        Ok(Self { lists, probe_lists })
    }
}

fn parse_positive(map: &HashMap<String, String>, key: &str) -> IndexResult<usize> {
    let raw = map
        .get(key)
        .ok_or_else(|| IndexError::invalid_options(format!("missing required option `{key}`")))?;
    let value: usize = raw
        .parse()
        .map_err(|_| IndexError::invalid_options(format!("option `{key}` must be a positive integer, got `{raw}`")))?;
    if value == 0 {
        return Err(IndexError::invalid_options(format!("option `{key}` must be > 0")));
    }
    Ok(value)
}
