//! Top-k context ids by descending score.

use crate::{FtsError, Id, Score};

/// Partial-sort indices of `scores` descending and return the first `k`
/// context ids (`k` is clamped to `cids.len()`).
///
/// Grounded on `FTSAlgorithms::getTopKByScores`: a `partial_sort` over an
/// index vector rather than sorting `cids` directly, so ties keep the
/// index-comparator's (unspecified but stable-enough) order.
pub fn top_k_by_score(cids: &[Id], scores: &[Score], k: usize) -> Result<Vec<Id>, FtsError> {
    if cids.len() != scores.len() {
        return Err(FtsError::LengthMismatch(format!(
            "cids={} scores={}",
            cids.len(),
            scores.len()
        )));
    }
    let k = k.min(cids.len());
    if k == 0 {
        return Ok(Vec::new());
    }
    let mut indices: Vec<usize> = (0..cids.len()).collect();
    indices.select_nth_unstable_by(k - 1, |&a, &b| scores[b].cmp(&scores[a]));
    indices.truncate(k);
    indices.sort_unstable_by(|&a, &b| scores[b].cmp(&scores[a]));
    Ok(indices.into_iter().map(|i| cids[i]).collect())
}
