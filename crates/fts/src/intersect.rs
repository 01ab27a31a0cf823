//! Sorted-list intersections over posting lists.
//!
//! The original (`FTSAlgorithms::intersectTwoPostingLists`, `::intersect`,
//! `::intersectKWay`) appends three sentinel values to the tails of its
//! input vectors so the inner merge loop never bounds-checks, then strips
//! them back off before returning. That trick mutates the caller's
//! buffers (briefly) and is not expressible soundly in safe Rust without
//! owning a copy first, at which point the saved bounds-check is moot.
//! These implementations instead use a plain index-based merge: no
//! sentinel escapes this module, and the caller's slices are never
//! mutated, matching §9's "Sentinel-based intersection" note and the
//! resource-scoping rule that intermediate buffers are owned by the
//! operator that reads them.

use crate::{FtsError, Id, Score};

/// Two-way intersection of word posting lists (`cids1`/`scores1`,
/// `cids2`/`scores2`), both sorted ascending on cid. On each matching
/// context, emits one row with the summed score.
///
/// Grounded on `FTSAlgorithms::intersectTwoPostingLists`.
pub fn intersect_two_way(
    cids1: &[Id],
    scores1: &[Score],
    cids2: &[Id],
    scores2: &[Score],
) -> Result<(Vec<Id>, Vec<Score>), FtsError> {
    if cids1.len() != scores1.len() {
        return Err(FtsError::LengthMismatch("cids1/scores1".to_string()));
    }
    if cids2.len() != scores2.len() {
        return Err(FtsError::LengthMismatch("cids2/scores2".to_string()));
    }

    let mut result_cids = Vec::new();
    let mut result_scores = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < cids1.len() && j < cids2.len() {
        match cids1[i].cmp(&cids2[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                result_cids.push(cids1[i]);
                result_scores.push(scores1[i] + scores2[j]);
                i += 1;
                j += 1;
            }
        }
    }
    Ok((result_cids, result_scores))
}

/// Intersection between a plain word-matched context list (`matching_cids`)
/// and an entity-carrying block (`e_cids`/`e_payload`/`e_scores`). On each
/// matching context, emits *all* postings from the entity side for that
/// context (several entities can share a context).
///
/// Grounded on `FTSAlgorithms::intersect`.
pub fn intersect_entity(
    matching_cids: &[Id],
    e_cids: &[Id],
    e_payload: &[Id],
    e_scores: &[Score],
) -> Result<(Vec<Id>, Vec<Id>, Vec<Score>), FtsError> {
    if e_cids.len() != e_payload.len() || e_cids.len() != e_scores.len() {
        return Err(FtsError::LengthMismatch(format!(
            "e_cids={} e_payload={} e_scores={}",
            e_cids.len(),
            e_payload.len(),
            e_scores.len()
        )));
    }

    let mut result_cids = Vec::new();
    let mut result_eids = Vec::new();
    let mut result_scores = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < matching_cids.len() && j < e_cids.len() {
        match matching_cids[i].cmp(&e_cids[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                let cid = matching_cids[i];
                while j < e_cids.len() && e_cids[j] == cid {
                    result_cids.push(cid);
                    result_eids.push(e_payload[j]);
                    result_scores.push(e_scores[j]);
                    j += 1;
                }
                i += 1;
            }
        }
    }
    Ok((result_cids, result_eids, result_scores))
}

/// One k-way posting list: parallel `cids`/`scores`, optionally carrying a
/// payload (word/entity id) when it is the last list in entity mode.
pub struct KwayList<'a> {
    /// Context ids, sorted ascending.
    pub cids: &'a [Id],
    /// Score contributed by each posting.
    pub scores: &'a [Score],
    /// Entity id carried by each posting — only read when this is the
    /// last list passed to [`intersect_kway`].
    pub payload: Option<&'a [Id]>,
}

/// Contexts appearing in every one of `lists`, summing contributed scores.
///
/// If the last list carries a payload (`entity mode`), emits one output
/// row per matching posting in that list (several entities can share a
/// context); otherwise emits a single row per matching context.
///
/// Grounded on `FTSAlgorithms::intersectKWay`: round-robin advance of a
/// `currentContext`/`streak` pair across list cursors, jumping back to
/// the last (sparsest) list after every hit, terminating when any list is
/// exhausted at its current cursor.
pub fn intersect_kway(lists: &[KwayList<'_>]) -> Result<(Vec<Id>, Vec<Id>, Vec<Score>), FtsError> {
    let k = lists.len();
    if k == 0 {
        return Err(FtsError::EmptyInput);
    }
    if lists.iter().any(|l| l.cids.is_empty()) {
        return Ok((Vec::new(), Vec::new(), Vec::new()));
    }
    for l in lists {
        if l.cids.len() != l.scores.len() {
            return Err(FtsError::LengthMismatch("cids/scores".to_string()));
        }
        if let Some(p) = l.payload {
            if p.len() != l.cids.len() {
                return Err(FtsError::LengthMismatch("cids/payload".to_string()));
            }
        }
    }

    let entity_mode = lists[k - 1].payload.is_some();

    let mut cursor = vec![0usize; k];
    let mut current_list = k - 1;
    let mut current_context = lists[k - 1].cids[0];
    let mut streak = 0usize;

    let mut result_cids = Vec::new();
    let mut result_eids = Vec::new();
    let mut result_scores = Vec::new();

    loop {
        let len = lists[current_list].cids.len();
        while cursor[current_list] < len && lists[current_list].cids[cursor[current_list]] < current_context
        {
            cursor[current_list] += 1;
        }
        if cursor[current_list] == len {
            break;
        }

        let at = lists[current_list].cids[cursor[current_list]];
        if at == current_context {
            streak += 1;
            if streak == k {
                let mut sum: Score = 0;
                for (idx, list) in lists.iter().enumerate().take(k - 1) {
                    let c = if idx == current_list {
                        cursor[idx]
                    } else {
                        cursor[idx].saturating_sub(1)
                    };
                    sum += list.scores[c];
                }

                if entity_mode {
                    let last = &lists[k - 1];
                    let payload = last.payload.unwrap();
                    let mut c = if current_list == k - 1 {
                        cursor[k - 1]
                    } else {
                        cursor[k - 1].saturating_sub(1)
                    };
                    while c < last.cids.len() && last.cids[c] == current_context {
                        result_cids.push(current_context);
                        result_eids.push(payload[c]);
                        result_scores.push(sum + last.scores[c]);
                        c += 1;
                    }
                    // Keep the k-1'th list's own cursor consistent with
                    // how far we just walked so a later round-robin turn
                    // resumes past this context.
                    cursor[k - 1] = c;
                } else {
                    let last_contrib_col = if k - 1 == current_list {
                        cursor[k - 1]
                    } else {
                        cursor[k - 1].saturating_sub(1)
                    };
                    result_cids.push(current_context);
                    result_scores.push(sum + lists[k - 1].scores[last_contrib_col]);
                }

                current_list = k - 1;
                streak = 0;
                continue;
            }
        } else {
            streak = 1;
            current_context = at;
        }
        cursor[current_list] += 1;
        current_list += 1;
        if current_list == k {
            current_list = 0;
        }
    }

    Ok((result_cids, result_eids, result_scores))
}
