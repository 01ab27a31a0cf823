//! Entity aggregation: collapse `(cid, eid, score)` postings down to one
//! row per entity, retaining its top-k contexts by score.

use crate::{FtsError, Id, Score};
use rustc_hash::FxHashMap;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// One output row: an entity, its total occurrence count, and one of its
/// retained contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityContextRow {
    /// Entity id.
    pub eid: Id,
    /// Total number of postings seen for this entity (not just the
    /// retained ones).
    pub occurrence_count: u64,
    /// A context this entity occurs in, among its top-k by score.
    pub cid: Id,
}

/// Aggregate `(cids, eids, scores)` into per-entity rows, keeping at most
/// `k` contexts per entity ranked by descending score.
///
/// Grounded on `FTSAlgorithms::aggScoresAndTakeTopKContexts` /
/// `aggScoresAndTakeTopContext`: `k == 1` takes the O(n) single-pass fast
/// path (`aggScoresAndTakeTopContext`); `k > 1` bounds a per-entity
/// min-heap at size `k` (the original uses an ordered `set`; a binary
/// heap gives the same "evict the minimum when full and about to exceed
/// it" behavior with less overhead). The result is unordered across
/// entities, matching the source.
pub fn aggregate_top_k_contexts(
    cids: &[Id],
    eids: &[Id],
    scores: &[Score],
    k: usize,
) -> Result<Vec<EntityContextRow>, FtsError> {
    if cids.len() != eids.len() || cids.len() != scores.len() {
        return Err(FtsError::LengthMismatch(format!(
            "cids={} eids={} scores={}",
            cids.len(),
            eids.len(),
            scores.len()
        )));
    }

    if k <= 1 {
        return Ok(aggregate_top_context(cids, eids, scores));
    }

    // Min-heap of (score, cid) per entity, bounded at size k.
    struct Entry {
        count: u64,
        heap: BinaryHeap<Reverse<(Score, Id)>>,
    }

    let mut map: FxHashMap<Id, Entry> = FxHashMap::default();
    for i in 0..eids.len() {
        let entry = map.entry(eids[i]).or_insert_with(|| Entry {
            count: 0,
            heap: BinaryHeap::with_capacity(k),
        });
        entry.count += 1;
        if entry.heap.len() < k {
            entry.heap.push(Reverse((scores[i], cids[i])));
        } else if let Some(&Reverse((min_score, _))) = entry.heap.peek() {
            if scores[i] > min_score {
                entry.heap.pop();
                entry.heap.push(Reverse((scores[i], cids[i])));
            }
        }
    }

    let mut result = Vec::new();
    for (eid, entry) in map {
        let mut contexts: Vec<(Score, Id)> = entry.heap.into_iter().map(|Reverse(p)| p).collect();
        contexts.sort_unstable_by(|a, b| b.0.cmp(&a.0));
        for (_, cid) in contexts {
            result.push(EntityContextRow {
                eid,
                occurrence_count: entry.count,
                cid,
            });
        }
    }
    Ok(result)
}

fn aggregate_top_context(cids: &[Id], eids: &[Id], scores: &[Score]) -> Vec<EntityContextRow> {
    struct Best {
        count: u64,
        cid: Id,
        score: Score,
    }
    let mut map: FxHashMap<Id, Best> = FxHashMap::default();
    for i in 0..eids.len() {
        map.entry(eids[i])
            .and_modify(|best| {
                best.count += 1;
                if scores[i] > best.score {
                    best.cid = cids[i];
                    best.score = scores[i];
                }
            })
            .or_insert(Best {
                count: 1,
                cid: cids[i],
                score: scores[i],
            });
    }
    map.into_iter()
        .map(|(eid, best)| EntityContextRow {
            eid,
            occurrence_count: best.count,
            cid: best.cid,
        })
        .collect()
}

/// Aggregate wide sub-result rows `[eid, _, cid, col3, col4, ...]` by
/// `(eid, col3, col4, ..., cid)`, keeping at most `k` rows per
/// `(eid, extras)` group and patching the count column (index 1) of
/// retained rows to the full group size.
///
/// Grounded on `FTSAlgorithms::aggScoresAndTakeTopKContexts<Row>`: stable
/// sort by the composite key, then a single streaming pass that counts
/// run lengths and only keeps the first `k` rows of each run.
pub fn aggregate_wide_top_k(mut rows: Vec<Vec<Id>>, k: usize) -> Vec<Vec<Id>> {
    if rows.is_empty() {
        return rows;
    }
    let width = rows[0].len();
    rows.sort_by(|l, r| {
        if l[0] != r[0] {
            return l[0].cmp(&r[0]);
        }
        for i in 3..width {
            if l[i] != r[i] {
                return l[i].cmp(&r[i]);
            }
        }
        l[2].cmp(&r[2])
    });

    let same_group = |a: &[Id], b: &[Id]| a[0] == b[0] && a[3..width] == b[3..width];

    let mut result: Vec<Vec<Id>> = Vec::with_capacity(rows.len());
    let mut contexts_in_group = 1usize;
    result.push(rows[0].clone());
    for i in 1..rows.len() {
        if same_group(&rows[i], &rows[i - 1]) {
            contexts_in_group += 1;
            if contexts_in_group <= k {
                result.push(rows[i].clone());
            }
        } else {
            let kept = contexts_in_group.min(k);
            let start = result.len() - kept;
            for row in &mut result[start..] {
                row[1] = contexts_in_group as Id;
            }
            result.push(rows[i].clone());
            contexts_in_group = 1;
        }
    }
    let kept = contexts_in_group.min(k);
    let start = result.len() - kept;
    for row in &mut result[start..] {
        row[1] = contexts_in_group as Id;
    }
    result
}
