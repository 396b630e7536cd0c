use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Distance function tag recognized by the vector-index core.
///
/// Every tag shares the same "smaller is nearer" convention: inner-product
/// similarity is negated, and cosine uses distance (`1 - similarity`) rather
/// than raw similarity, so a single `<` comparison works for all three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceTag {
    /// Squared Euclidean distance (monotonic with true L2; skips the sqrt).
    L2,
    /// Negated inner product, so that minimizing it maximizes similarity.
    InnerProduct,
    /// `1 - cosine_similarity`, so that `0` means identical direction.
    Cosine,
}

impl DistanceTag {
    /// Canonical lowercase spelling, matching the DDL option syntax.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::L2 => "l2",
            Self::InnerProduct => "inner_product",
            Self::Cosine => "cosine",
        }
    }
}

impl FromStr for DistanceTag {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "l2" => Ok(Self::L2),
            "inner_product" | "ip" => Ok(Self::InnerProduct),
            "cosine" => Ok(Self::Cosine),
            _ => Err(()),
        }
    }
}

/// Computes the distance between two equal-length, finite vectors under
/// `tag`. The caller is responsible for the equal-length and finiteness
/// preconditions; this function performs no allocation and has no error
/// path.
///
/// A dimensionality mismatch is a programming error, enforced here with a
/// `debug_assert!` rather than a `Result`, matching the rest of the crate's
/// treatment of invariant violations.
#[must_use]
pub fn compute_distance(a: &[f64], b: &[f64], tag: DistanceTag) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have equal length");

    match tag {
        DistanceTag::L2 => l2_squared(a, b),
        DistanceTag::InnerProduct => -dot(a, b),
        DistanceTag::Cosine => cosine_distance(a, b),
    }
}

/// `Σ (a_i - b_i)^2`.
fn l2_squared(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// `Σ a_i * b_i`.
fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// `1 - (a . b) / (|a| * |b|)`, or `1.0` if either operand has zero norm.
fn cosine_distance(a: &[f64], b: &[f64]) -> f64 {
    let norm_a = dot(a, a).sqrt();
    let norm_b = dot(b, b).sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    1.0 - dot(a, b) / (norm_a * norm_b)
}
