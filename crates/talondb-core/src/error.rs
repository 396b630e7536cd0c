use thiserror::Error;

/// Canonical error type for the vector-index core.
///
/// Dimensionality mismatches and other invariant violations are not
/// represented here: they are programming errors enforced by
/// `debug_assert!` at the call site, not conditions a well-typed caller
/// can recover from. `InvalidOptions` below is the one class of error the
/// index layer does surface through a `Result`. The insert executor's own
/// failure path (a table-heap insert that fails) is handled by skipping
/// the row, not by an error variant here.
#[derive(Debug, Error)]
pub enum IndexError {
    /// A required option was missing, non-positive, or otherwise out of
    /// range when constructing an index from its DDL option map.
    #[error("invalid index options: {message}")]
    InvalidOptions {
        /// Human-readable explanation of which option failed validation.
        message: String,
    },
}

impl IndexError {
    /// Creates an `InvalidOptions` variant.
    #[must_use]
    pub fn invalid_options(message: impl Into<String>) -> Self {
        Self::InvalidOptions {
            message: message.into(),
        }
    }
}

/// Convenient result alias for index construction.
pub type IndexResult<T> = Result<T, IndexError>;
