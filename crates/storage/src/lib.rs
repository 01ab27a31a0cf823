//! Read-only index access for the triple-store query engine core.
//!
//! This crate provides the trait-shaped seam between the planner/FTS core
//! and the on-disk index: a `TripleIndex` answering the four scan variants
//! from spec §4.B, and an `FtsIndex` answering posting-list reads for §4.G.
//! The on-disk index builder and its binary layout are external
//! collaborators and are not modeled here; in-memory implementations are
//! provided for tests and for embedding contexts that load data some other
//! way.
//!
//! # Example
//!
//! ```rust
//! use storage::{InMemoryTripleIndex, ScanVariant, TripleIndex};
//!
//! let index = InMemoryTripleIndex::from_triples(vec![(1, 10, 100), (2, 10, 100)]);
//! let subjects: Vec<_> = index.scan_bound(ScanVariant::PosBoundO, 10, 100).unwrap().collect();
//! assert_eq!(subjects, vec![1, 2]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod backend;
mod fts_index;
mod indexes;
mod observability;

pub use backend::{StorageError, StorageResult};
pub use fts_index::{FtsIndex, IdRange, InMemoryFtsIndex, PostingList};
pub use indexes::{Id, InMemoryTripleIndex, ScanVariant, TripleIndex};
pub use observability::{record_error, track_operation, OperationType};
