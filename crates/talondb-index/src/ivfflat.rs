//! IVFFlat (inverted-file flat) index.
//!
//! One k-means-style centroid assignment pass at build time, then linear
//! probing of the nearest `probe_lists` centroids' buckets at scan time.
//! No re-clustering after the initial build; inserted vectors are routed
//! to their nearest existing centroid and the centroid itself is never
//! recomputed.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng, SeedableRng};

use talondb_core::{compute_distance, DistanceTag, Rid};

use crate::types::IvfFlatOptions;

/// An IVFFlat vector index: a fixed set of centroids, each owning a bucket
/// of the vectors nearest to it.
#[derive(Debug, Clone)]
pub struct IvfFlatIndex {
    dimension: usize,
    distance_tag: DistanceTag,
    options: IvfFlatOptions,
    centroids: Vec<Vec<f64>>,
    buckets: Vec<Vec<(Vec<f64>, Rid)>>,
}

impl IvfFlatIndex {
    /// Creates an empty IVFFlat index. `build_index` must run before
    /// `insert_vector_entry` or `scan_vector_key` are meaningful, since the
    /// centroid set doesn't exist until then.
    #[must_use]
    pub fn new(dimension: usize, distance_tag: DistanceTag, options: IvfFlatOptions) -> Self {
        Self {
            dimension,
            distance_tag,
            options,
            centroids: Vec::new(),
            buckets: Vec::new(),
        }
    }

    /// The fixed dimensionality this index was built for.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Whether `build_index` has produced any centroids yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.centroids.is_empty()
    }

    /// The number of centroid buckets (`min(lists, data.len())` after a
    /// build; `0` before one).
    #[must_use]
    pub fn list_count(&self) -> usize {
        self.centroids.len()
    }

    /// Builds the centroid/bucket structure from `data` in a single pass:
    /// seed centroids are `lists` (clamped to `data.len()`, since a request
    /// for more lists than there are vectors has no well-defined seed set)
    /// vectors chosen uniformly at random without replacement, then every
    /// vector is assigned to its nearest seed and each centroid is
    /// replaced by the mean of its bucket. A bucket that ends up empty
    /// keeps its seed centroid rather than averaging zero vectors.
    ///
    /// A no-op on empty `data`, leaving the index with no centroids. Draws
    /// the seed centroids from a fresh, non-deterministic source on every
    /// call.
    pub fn build_index(&mut self, data: &[(Vec<f64>, Rid)]) {
        self.build_index_with_rng(data, &mut thread_rng());
    }

    /// Same as `build_index`, but draws seed centroids using `seed` instead
    /// of a fresh non-deterministic source, so the resulting centroid/bucket
    /// assignment is reproducible across runs. Intended for tests that need
    /// a deterministic build.
    pub fn build_index_seeded(&mut self, data: &[(Vec<f64>, Rid)], seed: u64) {
        self.build_index_with_rng(data, &mut StdRng::seed_from_u64(seed));
    }

    fn build_index_with_rng(&mut self, data: &[(Vec<f64>, Rid)], rng: &mut impl Rng) {
        let span = tracing::debug_span!("ivfflat_build_index", count = data.len());
        let _guard = span.enter();

        if data.is_empty() {
            return;
        }

        let lists = self.options.lists.min(data.len());
        let seeds = random_centroids(data, lists, rng);
        let (centroids, buckets) = assign_to_centroids(data, &seeds, self.distance_tag);
        self.centroids = centroids;
        self.buckets = buckets;

        tracing::debug!(lists = self.list_count(), "ivfflat build_index complete");
    }

    /// Routes `vector` to its nearest existing centroid's bucket.
    ///
    /// # Panics
    ///
    /// Panics (via `debug_assert!`) if `build_index` has not run yet, or
    /// if `vector.len() != self.dimension()`.
    pub fn insert_vector_entry(&mut self, vector: Vec<f64>, rid: Rid) {
        debug_assert!(
            !self.centroids.is_empty(),
            "insert_vector_entry requires build_index to have run first"
        );
        debug_assert_eq!(
            vector.len(),
            self.dimension,
            "vector dimensionality does not match index"
        );

        let centroid = nearest_centroid(&vector, &self.centroids, self.distance_tag);
        self.buckets[centroid].push((vector, rid));

        tracing::debug!(centroid, %rid, "ivfflat insert_vector_entry");
    }

    /// Returns up to `limit` `(rid, distance)` pairs nearest to `query`,
    /// probing the `probe_lists` centroids nearest to `query` and sorting
    /// every vector found in their buckets. Returns an empty vector if no
    /// build has run yet or `limit == 0`.
    ///
    /// # Panics
    ///
    /// Panics (via `debug_assert!`) if `query.len() != self.dimension()`.
    #[must_use]
    pub fn scan_vector_key(&self, query: &[f64], limit: usize) -> Vec<(Rid, f64)> {
        let span = tracing::debug_span!(
            "ivfflat_scan_vector_key",
            limit,
            lists = self.list_count(),
            probe_lists = self.options.probe_lists
        );
        let _guard = span.enter();

        debug_assert_eq!(
            query.len(),
            self.dimension,
            "query dimensionality does not match index"
        );

        if self.centroids.is_empty() || limit == 0 {
            tracing::debug!(returned = 0, "ivfflat scan_vector_key complete");
            return Vec::new();
        }

        let mut order: Vec<usize> = (0..self.centroids.len()).collect();
        order.sort_by(|&i, &j| {
            let di = compute_distance(&self.centroids[i], query, self.distance_tag);
            let dj = compute_distance(&self.centroids[j], query, self.distance_tag);
            di.total_cmp(&dj)
        });

        let probe = self.options.probe_lists.min(order.len());
        let mut candidates: Vec<(Rid, f64)> = Vec::new();
        for &idx in &order[..probe] {
            for (vector, rid) in &self.buckets[idx] {
                candidates.push((*rid, compute_distance(vector, query, self.distance_tag)));
            }
        }

        candidates.sort_by(|a, b| a.1.total_cmp(&b.1));
        candidates.truncate(limit);

        tracing::debug!(returned = candidates.len(), "ivfflat scan_vector_key complete");
        candidates
    }
}

/// Picks `count` vectors from `data` uniformly at random without
/// replacement.
fn random_centroids(data: &[(Vec<f64>, Rid)], count: usize, rng: &mut impl Rng) -> Vec<Vec<f64>> {
    let mut indices: Vec<usize> = (0..data.len()).collect();
    indices.shuffle(rng);
    indices[..count].iter().map(|&i| data[i].0.clone()).collect()
}

/// Finds the index of the centroid nearest `vector`.
///
/// # Panics
///
/// Panics (via `debug_assert!`) if `centroids` is empty.
fn nearest_centroid(vector: &[f64], centroids: &[Vec<f64>], tag: DistanceTag) -> usize {
    debug_assert!(!centroids.is_empty(), "nearest_centroid requires at least one centroid");
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, centroid) in centroids.iter().enumerate() {
        let dist = compute_distance(vector, centroid, tag);
        if dist < best_dist {
            best_dist = dist;
            best = i;
        }
    }
    best
}

/// Assigns every vector in `data` to its nearest seed centroid, then
/// recomputes each centroid as the mean of its assigned bucket (retaining
/// the seed for any bucket that ends up empty).
fn assign_to_centroids(
    data: &[(Vec<f64>, Rid)],
    seeds: &[Vec<f64>],
    tag: DistanceTag,
) -> (Vec<Vec<f64>>, Vec<Vec<(Vec<f64>, Rid)>>) {
    let mut buckets: Vec<Vec<(Vec<f64>, Rid)>> = vec![Vec::new(); seeds.len()];
    for (vector, rid) in data {
        let centroid = nearest_centroid(vector, seeds, tag);
        buckets[centroid].push((vector.clone(), *rid));
    }

    let dimension = seeds.first().map_or(0, Vec::len);
    let centroids = buckets
        .iter()
        .enumerate()
        .map(|(i, bucket)| {
            if bucket.is_empty() {
                seeds[i].clone()
            } else {
                mean_vector(bucket.iter().map(|(v, _)| v.as_slice()), dimension)
            }
        })
        .collect();

    (centroids, buckets)
}

/// The elementwise mean of `vectors`, each assumed to have length
/// `dimension`.
///
/// # Panics
///
/// Panics if `vectors` is empty.
fn mean_vector<'a>(vectors: impl Iterator<Item = &'a [f64]>, dimension: usize) -> Vec<f64> {
    let mut sum = vec![0.0; dimension];
    let mut count = 0usize;
    for vector in vectors {
        for (s, v) in sum.iter_mut().zip(vector) {
            *s += v;
        }
        count += 1;
    }
    assert!(count > 0, "mean_vector requires at least one vector");
    for s in &mut sum {
        *s /= count as f64;
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(lists: usize, probe_lists: usize) -> IvfFlatOptions {
        IvfFlatOptions { lists, probe_lists }
    }

    fn clustered_data() -> Vec<(Vec<f64>, Rid)> {
        vec![
            (vec![0.0, 0.0], Rid::new(0, 0)),
            (vec![0.1, 0.0], Rid::new(0, 1)),
            (vec![10.0, 10.0], Rid::new(0, 2)),
            (vec![10.1, 10.0], Rid::new(0, 3)),
        ]
    }

    #[test]
    fn single_list_covers_all_data() {
        let mut index = IvfFlatIndex::new(2, DistanceTag::L2, options(1, 1));
        index.build_index(&clustered_data());
        assert_eq!(index.list_count(), 1);

        let result = index.scan_vector_key(&[0.0, 0.0], 10);
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn probe_lists_limits_coverage() {
        let mut index = IvfFlatIndex::new(2, DistanceTag::L2, options(2, 1));
        index.build_index(&clustered_data());
        assert_eq!(index.list_count(), 2);

        // Probing a single list should only surface the nearer cluster.
        let result = index.scan_vector_key(&[0.0, 0.0], 10);
        assert!(result.len() <= 2);
        for (rid, _) in &result {
            assert!(*rid == Rid::new(0, 0) || *rid == Rid::new(0, 1));
        }
    }

    #[test]
    fn lists_clamped_to_data_len() {
        let data = vec![(vec![1.0, 1.0], Rid::new(0, 0))];
        let mut index = IvfFlatIndex::new(2, DistanceTag::L2, options(8, 8));
        index.build_index(&data);
        assert_eq!(index.list_count(), 1);
    }

    #[test]
    fn insert_vector_entry_routes_to_nearest_bucket() {
        let mut index = IvfFlatIndex::new(2, DistanceTag::L2, options(2, 2));
        index.build_index(&clustered_data());
        index.insert_vector_entry(vec![10.05, 10.0], Rid::new(0, 4));

        let result = index.scan_vector_key(&[10.0, 10.0], 10);
        assert!(result.iter().any(|(rid, _)| *rid == Rid::new(0, 4)));
    }

    #[test]
    fn empty_build_leaves_index_empty() {
        let mut index = IvfFlatIndex::new(2, DistanceTag::L2, options(4, 2));
        index.build_index(&[]);
        assert!(index.is_empty());
        assert!(index.scan_vector_key(&[0.0, 0.0], 5).is_empty());
    }

    #[test]
    fn build_index_seeded_is_reproducible_across_runs() {
        let mut a = IvfFlatIndex::new(2, DistanceTag::L2, options(2, 2));
        a.build_index_seeded(&clustered_data(), 7);
        let mut b = IvfFlatIndex::new(2, DistanceTag::L2, options(2, 2));
        b.build_index_seeded(&clustered_data(), 7);

        assert_eq!(a.scan_vector_key(&[0.0, 0.0], 4), b.scan_vector_key(&[0.0, 0.0], 4));
    }
}
