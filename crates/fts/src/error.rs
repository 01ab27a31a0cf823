//! Error type for the FTS algorithm layer.

/// Errors raised by the set-algebraic primitives in this crate.
///
/// These are invariant violations in the *caller's* inputs (mismatched
/// parallel-vector lengths, an empty k-way intersection list) rather than
/// I/O failures — reading the posting lists off disk is the storage
/// crate's concern.
#[derive(Debug, thiserror::Error)]
pub enum FtsError {
    /// Parallel vectors (`cids`/`payload`/`scores`) did not agree on
    /// length.
    #[error("mismatched posting-list lengths: {0}")]
    LengthMismatch(String),

    /// `intersect_kway` was called with zero posting lists.
    #[error("k-way intersection requires at least one posting list")]
    EmptyInput,
}
