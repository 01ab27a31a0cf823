//! Cross-product materialization across sub-results joined through a
//! shared "context" variable.

use crate::{Id, Score};
use rustc_hash::{FxHashMap, FxHashSet};

/// Fixed 5-column cross product: for the posting window `[from,
/// to_exclusive)` over `(cids, eids, scores)`, collect the distinct
/// entities in that window belonging to `sub_res1` and to `sub_res2`, and
/// emit one row `(eid, score, cid, e1, e2)` per pairing in the Cartesian
/// product of the two collected lists, for every posting in the window.
///
/// Grounded on `FTSAlgorithms::appendCrossProduct` (the `array<Id, 5>`
/// overload).
pub fn append_cross_product(
    cids: &[Id],
    eids: &[Id],
    scores: &[Score],
    from: usize,
    to_exclusive: usize,
    sub_res1: &FxHashSet<Id>,
    sub_res2: &FxHashSet<Id>,
    out: &mut Vec<[Id; 5]>,
) {
    let mut context_sub_res1 = Vec::new();
    let mut context_sub_res2 = Vec::new();
    let mut done = FxHashSet::default();
    for &eid in &eids[from..to_exclusive] {
        if !done.insert(eid) {
            continue;
        }
        if sub_res1.contains(&eid) {
            context_sub_res1.push(eid);
        }
        if sub_res2.contains(&eid) {
            context_sub_res2.push(eid);
        }
    }

    for i in from..to_exclusive {
        for &e1 in &context_sub_res1 {
            for &e2 in &context_sub_res2 {
                out.push([eids[i], scores[i] as Id, cids[i], e1, e2]);
            }
        }
    }
}

/// Variable-width cross product: like [`append_cross_product`], but each
/// sub-result is a map from entity id to a list of row suffixes rather
/// than a flat membership set. For every posting in the window, emits
/// `|∏ matches|` rows, treating the output row index as a mixed-radix
/// number whose digits select a suffix from each sub-result in turn.
///
/// Grounded on `FTSAlgorithms::appendCrossProduct` (the
/// `vector<unordered_map<Id, vector<vector<Id>>>>` overload).
pub fn append_cross_product_variable_width(
    cids: &[Id],
    eids: &[Id],
    scores: &[Score],
    from: usize,
    to_exclusive: usize,
    sub_res_maps: &[FxHashMap<Id, Vec<Vec<Id>>>],
    out: &mut Vec<Vec<Id>>,
) {
    let mut sub_res_matches: Vec<Vec<&Vec<Id>>> = vec![Vec::new(); sub_res_maps.len()];
    let mut distinct_eids = FxHashSet::default();
    for &eid in &eids[from..to_exclusive] {
        if !distinct_eids.insert(eid) {
            continue;
        }
        for (j, map) in sub_res_maps.iter().enumerate() {
            if let Some(rows) = map.get(&eid) {
                sub_res_matches[j].extend(rows.iter());
            }
        }
    }

    for i in from..to_exclusive {
        let nof_result_rows: usize = sub_res_matches.iter().map(|m| m.len()).product();
        for n in 0..nof_result_rows {
            let mut row = vec![eids[i], scores[i] as Id, cids[i]];
            let mut index = n;
            for matches in &sub_res_matches {
                let chosen = index % matches.len().max(1);
                index /= matches.len().max(1);
                row.extend_from_slice(matches[chosen]);
            }
            out.push(row);
        }
    }
}
