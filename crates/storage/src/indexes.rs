//! Scan-variant index abstraction and an in-memory reference implementation.
//!
//! The on-disk index builder and its binary layout are out of scope (see
//! crate docs); this module specifies only the read interface the seed
//! generator (4.B) and DP enumerator (4.C) consume: "the index's ability
//! to answer scan-size queries" (spec §6).

use crate::{StorageError, StorageResult};
use rustc_hash::FxHashMap;

/// Dictionary-encoded identifier. Reserved sentinels `Id::MAX`, `Id::MAX -
/// 1`, `Id::MAX - 2` are used by the FTS intersection algorithms; real data
/// must never take those values.
pub type Id = u64;

/// Choice of index order and which triple positions are bound vs free.
///
/// Each variant fixes the scan's output sort column, per invariant 5: scans
/// with subject free are sorted on `?s`, scans with object free are sorted
/// on `?o`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanVariant {
    /// Predicate and object bound, subject free. Output sorted on `?s`.
    PosBoundO,
    /// Predicate and subject bound, object free. Output sorted on `?o`.
    PsoBoundS,
    /// Predicate bound, subject and object free, columns (`?s`, `?o`).
    /// Output sorted on `?s`.
    PsoFreeS,
    /// Predicate bound, subject and object free, columns (`?o`, `?s`).
    /// Output sorted on `?o`.
    PosFreeO,
}

impl ScanVariant {
    /// Whether this variant has exactly one free triple position.
    pub fn is_bound(&self) -> bool {
        matches!(self, ScanVariant::PosBoundO | ScanVariant::PsoBoundS)
    }
}

/// Read-only access to the triple index's four scan variants.
///
/// Implementations answer scans over a fixed predicate: the "bound"
/// variants additionally fix subject or object and return the single free
/// column sorted ascending; the "free" variants fix only the predicate and
/// return both free columns as pairs, sorted ascending on the first.
pub trait TripleIndex: Send + Sync {
    /// Scan a 1-variable pattern: `POS_BOUND_O` (object bound, yields `?s`)
    /// or `PSO_BOUND_S` (subject bound, yields `?o`).
    fn scan_bound(
        &self,
        variant: ScanVariant,
        predicate: Id,
        bound: Id,
    ) -> StorageResult<Box<dyn Iterator<Item = Id> + '_>>;

    /// Scan a 2-variable pattern: `PSO_FREE_S` (columns `?s, ?o`) or
    /// `POS_FREE_O` (columns `?o, ?s`).
    fn scan_free(
        &self,
        variant: ScanVariant,
        predicate: Id,
    ) -> StorageResult<Box<dyn Iterator<Item = (Id, Id)> + '_>>;

    /// Estimated number of rows a scan would return, used by the cost
    /// model (4.C) without materializing the scan.
    fn size_estimate(&self, variant: ScanVariant, predicate: Id, bound: Option<Id>) -> u64;
}

/// In-memory `TripleIndex` for tests and for embedding contexts that load
/// their data from something other than the on-disk format.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTripleIndex {
    /// predicate -> sorted (subject, object) pairs
    by_predicate: FxHashMap<Id, Vec<(Id, Id)>>,
}

impl InMemoryTripleIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load triples (as (subject, predicate, object) id triples). Sorts
    /// and deduplicates per predicate so scans can be served by binary
    /// search.
    pub fn from_triples(triples: impl IntoIterator<Item = (Id, Id, Id)>) -> Self {
        let mut by_predicate: FxHashMap<Id, Vec<(Id, Id)>> = FxHashMap::default();
        for (s, p, o) in triples {
            by_predicate.entry(p).or_default().push((s, o));
        }
        for rows in by_predicate.values_mut() {
            rows.sort_unstable();
            rows.dedup();
        }
        Self { by_predicate }
    }
}

impl TripleIndex for InMemoryTripleIndex {
    fn scan_bound(
        &self,
        variant: ScanVariant,
        predicate: Id,
        bound: Id,
    ) -> StorageResult<Box<dyn Iterator<Item = Id> + '_>> {
        let Some(rows) = self.by_predicate.get(&predicate) else {
            return Ok(Box::new(std::iter::empty()));
        };
        let mut out: Vec<Id> = match variant {
            ScanVariant::PosBoundO => rows
                .iter()
                .filter(|(_, o)| *o == bound)
                .map(|(s, _)| *s)
                .collect(),
            ScanVariant::PsoBoundS => rows
                .iter()
                .filter(|(s, _)| *s == bound)
                .map(|(_, o)| *o)
                .collect(),
            ScanVariant::PsoFreeS | ScanVariant::PosFreeO => {
                return Err(StorageError::IndexUnavailable(format!(
                    "{variant:?} is not a bound scan"
                )));
            }
        };
        out.sort_unstable();
        Ok(Box::new(out.into_iter()))
    }

    fn scan_free(
        &self,
        variant: ScanVariant,
        predicate: Id,
    ) -> StorageResult<Box<dyn Iterator<Item = (Id, Id)> + '_>> {
        let Some(rows) = self.by_predicate.get(&predicate) else {
            return Ok(Box::new(std::iter::empty()));
        };
        let mut out: Vec<(Id, Id)> = match variant {
            ScanVariant::PsoFreeS => rows.clone(),
            ScanVariant::PosFreeO => rows.iter().map(|(s, o)| (*o, *s)).collect(),
            ScanVariant::PosBoundO | ScanVariant::PsoBoundS => {
                return Err(StorageError::IndexUnavailable(format!(
                    "{variant:?} is not a free scan"
                )));
            }
        };
        out.sort_unstable();
        Ok(Box::new(out.into_iter()))
    }

    fn size_estimate(&self, variant: ScanVariant, predicate: Id, bound: Option<Id>) -> u64 {
        let Some(rows) = self.by_predicate.get(&predicate) else {
            return 0;
        };
        match (variant, bound) {
            (ScanVariant::PosBoundO, Some(o)) => {
                rows.iter().filter(|(_, obj)| *obj == o).count() as u64
            }
            (ScanVariant::PsoBoundS, Some(s)) => {
                rows.iter().filter(|(subj, _)| *subj == s).count() as u64
            }
            _ => rows.len() as u64,
        }
    }
}
