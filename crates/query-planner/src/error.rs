//! Planner error taxonomy.
//!
//! Only the `NOT_YET_IMPLEMENTED` and `INTERNAL` classes from §7 are
//! modeled here — `BAD_REQUEST` and `PARSE_ERROR` belong to the external
//! parser/server and are not this crate's concern.

/// Errors the planner can report.
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    /// A construct outside this core's scope: predicate-variable triples,
    /// triples with zero or ≥3 variables, multi-column joins, cyclic join
    /// graphs, or a text subgraph split with more than one non-text
    /// component.
    #[error("not yet implemented: {0}")]
    NotYetImplemented(String),

    /// An invariant the planner must never violate was violated: an empty
    /// DP row, a variable missing from a map that should contain it, and
    /// similar internal-consistency failures. The planner never recovers
    /// locally from these — fail loudly.
    #[error("internal invariant violated: {0}")]
    Invariant(String),

    /// A lower-layer storage error, propagated unchanged.
    #[error(transparent)]
    Storage(#[from] storage::StorageError),

    /// A lower-layer FTS algorithm error, propagated unchanged.
    #[error(transparent)]
    Fts(#[from] fts::FtsError),
}

/// Result type for planner operations.
pub type PlannerResult<T> = Result<T, PlannerError>;
