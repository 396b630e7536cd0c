//! Single-layer navigable small world graph, the building block HNSW
//! stacks to get a proximity index.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use talondb_core::{compute_distance, DistanceTag};

/// One entry in a search heap: a distance paired with the vertex id it
/// belongs to. Ordered on the distance alone, with `f64::total_cmp` so that
/// the (assumed-finite, see the distance-kernel contract) distances form a
/// total order usable in a `BinaryHeap`.
#[derive(Debug, Clone, Copy)]
struct DistEntry {
    dist: f64,
    id: usize,
}

impl PartialEq for DistEntry {
    fn eq(&self, other: &Self) -> bool {
        self.dist == other.dist && self.id == other.id
    }
}
impl Eq for DistEntry {}

impl PartialOrd for DistEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DistEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dist.total_cmp(&other.dist)
    }
}

/// A single NSW proximity graph: a dense `[0, n)` vertex-id space plus an
/// undirected adjacency list. The layer does not own the vector store; the
/// vectors it searches over are passed in by the owning `HnswIndex` so that
/// every layer in a (future, multi-layer) stack can share one store.
#[derive(Debug, Clone)]
pub struct NswLayer {
    distance_tag: DistanceTag,
    in_vertices: Vec<usize>,
    edges: HashMap<usize, Vec<usize>>,
}

impl NswLayer {
    /// Creates an empty layer for the given distance function.
    #[must_use]
    pub fn new(distance_tag: DistanceTag) -> Self {
        Self {
            distance_tag,
            in_vertices: Vec::new(),
            edges: HashMap::new(),
        }
    }

    /// Whether any vertex has been added to this layer yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.in_vertices.is_empty()
    }

    /// Vertex ids present in the layer, in insertion order.
    #[must_use]
    pub fn in_vertices(&self) -> &[usize] {
        &self.in_vertices
    }

    /// Neighbor ids of `id`, or an empty slice if `id` has none.
    #[must_use]
    pub fn neighbors(&self, id: usize) -> &[usize] {
        self.edges.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Greedy best-first search for the `limit` nearest vertices to `query`,
    /// starting from `entry`. Returns vertex ids sorted by ascending
    /// distance to `query`.
    ///
    /// # Panics
    ///
    /// Panics (via `debug_assert!`) if `limit == 0`.
    pub fn find_nearest_neighbors(
        &self,
        vectors: &[Vec<f64>],
        query: &[f64],
        limit: usize,
        entry: usize,
    ) -> Vec<usize> {
        debug_assert!(limit > 0, "limit must be > 0");

        let mut visited = HashSet::new();
        let mut explore: BinaryHeap<std::cmp::Reverse<DistEntry>> = BinaryHeap::new();
        let mut results: BinaryHeap<DistEntry> = BinaryHeap::new();

        let entry_dist = compute_distance(&vectors[entry], query, self.distance_tag);
        explore.push(std::cmp::Reverse(DistEntry {
            dist: entry_dist,
            id: entry,
        }));
        results.push(DistEntry {
            dist: entry_dist,
            id: entry,
        });
        visited.insert(entry);

        while let Some(std::cmp::Reverse(current)) = explore.pop() {
            if let Some(worst) = results.peek() {
                if current.dist > worst.dist {
                    break;
                }
            }
            for &neighbor in self.neighbors(current.id) {
                if visited.insert(neighbor) {
                    let dist = compute_distance(&vectors[neighbor], query, self.distance_tag);
                    explore.push(std::cmp::Reverse(DistEntry { dist, id: neighbor }));
                    results.push(DistEntry { dist, id: neighbor });
                    while results.len() > limit {
                        results.pop();
                    }
                }
            }
        }

        let mut ordered: Vec<DistEntry> = results.into_vec();
        ordered.sort_by(|a, b| a.dist.total_cmp(&b.dist));
        ordered.into_iter().map(|e| e.id).collect()
    }

    /// Inserts `id` into the layer, wiring it to up to `m` of its nearest
    /// existing neighbors. The candidate width during insertion search is
    /// `m`, not `ef_construction` — matching the source, which never
    /// consults `ef_construction` during the insertion search itself.
    pub fn insert(&mut self, vectors: &[Vec<f64>], vector: &[f64], id: usize, m: usize) {
        if !self.is_empty() {
            let entry = self.in_vertices[0];
            let neighbors = self.find_nearest_neighbors(vectors, vector, m, entry);
            for neighbor in neighbors.into_iter().take(m) {
                self.connect(id, neighbor);
            }
        }
        self.add_vertex(id);
    }

    /// Adds an undirected edge between `a` and `b`. Self-loops are rejected;
    /// duplicate edges are tolerated (search simply revisits them, which is
    /// harmless since `visited` is checked before expansion).
    pub fn connect(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.edges.entry(a).or_default().push(b);
        self.edges.entry(b).or_default().push(a);
    }

    /// Appends `id` to the layer's vertex list. Callers must ensure `id` is
    /// only added once.
    pub fn add_vertex(&mut self, id: usize) {
        self.in_vertices.push(id);
    }
}
