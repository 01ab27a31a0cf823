//! Storage error type shared by the triple-index and FTS-index traits.

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur while answering scan or posting-list queries.
///
/// The on-disk index builder and its binary layout are external
/// collaborators (see crate docs); this enum models only the failure
/// modes visible at the read interface the planner and FTS core consume.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The requested scan variant has no matching index built.
    #[error("index not available for scan variant: {0}")]
    IndexUnavailable(String),

    /// A bound id referenced a position outside the index's known range.
    #[error("id out of range: {0}")]
    IdOutOfRange(u64),

    /// The underlying index reported corruption or an unreadable page.
    #[error("index corruption: {0}")]
    Corruption(String),

    /// Backend-specific error not covered by the variants above.
    #[error("backend error: {0}")]
    Backend(String),
}
