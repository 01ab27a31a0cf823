//! Filter a word-posting block by an inclusive id range.

use crate::{FtsError, Id, IdRange, Score};
use tracing::error;

/// Retain postings whose word id falls inclusively within `range`,
/// preserving relative order.
///
/// Grounded on `FTSAlgorithms::filterByRange` (`FTSAlgorithms.cpp`): a
/// single linear pass, no sorting, no reordering.
pub fn filter_by_range(
    range: IdRange,
    block_cids: &[Id],
    block_wids: &[Id],
    block_scores: &[Score],
) -> Result<(Vec<Id>, Vec<Score>), FtsError> {
    if block_cids.len() != block_wids.len() || block_cids.len() != block_scores.len() {
        let msg = format!(
            "cids={} wids={} scores={}",
            block_cids.len(),
            block_wids.len(),
            block_scores.len()
        );
        error!(%msg, "filter_by_range: mismatched posting-list lengths");
        return Err(FtsError::LengthMismatch(msg));
    }

    let mut result_cids = Vec::with_capacity(block_cids.len());
    let mut result_scores = Vec::with_capacity(block_cids.len());
    for i in 0..block_wids.len() {
        if block_wids[i] >= range.first && block_wids[i] <= range.last {
            result_cids.push(block_cids[i]);
            result_scores.push(block_scores[i]);
        }
    }
    Ok((result_cids, result_scores))
}
