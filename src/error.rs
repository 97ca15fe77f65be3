//! Error types. Absence of a key is never an error; see `Option` returns on
//! [`Dictionary`](crate::Dictionary).

use thiserror::Error;

/// Rejected construction of a dictionary.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityError {
    /// A table must always have at least one bucket.
    #[error("initial capacity must be positive, got 0")]
    Zero,
}

/// Rejected resize policy configuration.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyError {
    #[error("grow threshold must be positive")]
    ZeroGrowThreshold,

    /// The shrink band must sit strictly below the grow band, otherwise one
    /// check could ask for both.
    #[error("shrink threshold {shrink_below} must be below grow threshold {grow_above}")]
    OverlappingThresholds {
        grow_above: usize,
        shrink_below: usize,
    },
}

/// A broken structural invariant, reported by
/// [`Dictionary::validate`](crate::Dictionary::validate).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantError {
    #[error("table has no buckets")]
    EmptyTable,

    #[error("count is {count} but buckets hold {actual} entries")]
    CountMismatch { count: usize, actual: usize },

    #[error("entry in bucket {found} belongs in bucket {expected} (capacity {capacity})")]
    MisplacedEntry {
        found: usize,
        expected: usize,
        capacity: usize,
    },

    #[error("cached hash of entry in bucket {bucket} does not match its key")]
    StaleHash { bucket: usize },

    #[error("key stored more than once (bucket {bucket})")]
    DuplicateKey { bucket: usize },
}
