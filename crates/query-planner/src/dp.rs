//! DP join enumerator (§4.C/§4.D): build up plans covering 1, 2, ... all
//! triple nodes by merging smaller plans, pruning each row down to one
//! plan per pruning key.

use crate::filter_pusher::push_filters;
use crate::merger::{merge, mergeable, prune};
use crate::operators::{PlanArena, PlanId};
use crate::query_model::{Filter, Var};
use crate::seeds::{generate_seeds, TermResolver};
use crate::triple_graph::TripleGraph;
use crate::PlannerError;
use rustc_hash::FxHashSet;
use storage::TripleIndex;
use tracing::debug;

/// One row of the DP table: every surviving plan covering exactly as many
/// triple nodes as the row's index (1-based; `rows[0]` covers 1 node).
pub type DpRow = Vec<PlanId>;

/// Enumerate join plans bottom-up. Builds row 1 from `generate_seeds` for
/// every triple node in `graph`, then for `k` from 2 up to `graph.len()`,
/// builds row `k` by merging every mergeable pair drawn from rows `i` and
/// `k - i` for `i` in `1..=k/2`, pruning by pruning key after each row. The
/// filter pusher (§4.E) runs against every surviving plan in a row right
/// after it is pruned, so a filter becomes applied as soon as the row's
/// plans first cover both its operands — never re-applied afterwards,
/// since `applied_filters` carries forward through every later merge.
///
/// Returns the final row (covering all of `graph`'s nodes) after the
/// caller applies any order-by/distinct capping — callers needing that
/// full-coverage row should index `rows[graph.len() - 1]`.
pub fn enumerate_plans(
    arena: &mut PlanArena,
    graph: &TripleGraph,
    filters: &[Filter],
    resolver: &dyn TermResolver,
    index: &dyn TripleIndex,
    context_vars: &FxHashSet<Var>,
) -> Result<Vec<DpRow>, PlannerError> {
    if graph.is_empty() {
        return Err(PlannerError::Invariant(
            "cannot enumerate plans over an empty triple graph".to_string(),
        ));
    }

    let mut rows: Vec<DpRow> = Vec::with_capacity(graph.len());

    let mut row1 = Vec::new();
    for node in 0..graph.len() as crate::operators::NodeId {
        let seeds = generate_seeds(node, graph.pattern(node), resolver, index, context_vars)?;
        for seed in seeds {
            row1.push(arena.insert(seed));
        }
    }
    let row1 = prune(arena, row1);
    let row1: Vec<PlanId> = row1
        .into_iter()
        .map(|id| push_filters(arena, id, filters))
        .collect();
    debug!(row = 1, plans = row1.len(), "built DP row");
    rows.push(row1);

    for k in 2..=graph.len() {
        let mut candidates = Vec::new();
        for i in 1..=k / 2 {
            let j = k - i;
            if i - 1 >= rows.len() || j - 1 >= rows.len() {
                continue;
            }
            let left_row = rows[i - 1].clone();
            let right_row = rows[j - 1].clone();
            for &left_id in &left_row {
                for &right_id in &right_row {
                    if i == j && left_id >= right_id {
                        continue;
                    }
                    let left = arena.get(left_id).clone();
                    let right = arena.get(right_id).clone();
                    if !mergeable(graph, &left, &right) {
                        continue;
                    }
                    match merge(arena, left_id, right_id) {
                        Ok(merged_id) => candidates.push(merged_id),
                        Err(PlannerError::NotYetImplemented(_)) => continue,
                        Err(e) => return Err(e),
                    }
                }
            }
        }
        if candidates.is_empty() {
            return Err(PlannerError::NotYetImplemented(
                "triple graph is disconnected or requires an unsupported join shape".to_string(),
            ));
        }
        let row = prune(arena, candidates);
        let row: Vec<PlanId> = row
            .into_iter()
            .map(|id| push_filters(arena, id, filters))
            .collect();
        debug!(row = k, plans = row.len(), "built DP row");
        rows.push(row);
    }

    Ok(rows)
}

/// Choose the cheapest plan in `row`, breaking ties by lowest `PlanId`
/// (i.e. insertion order — deterministic given identical cost estimates).
pub fn cheapest(arena: &PlanArena, row: &DpRow) -> Result<PlanId, PlannerError> {
    row.iter()
        .copied()
        .min_by_key(|&id| (arena.get(id).cost_estimate, id))
        .ok_or_else(|| PlannerError::Invariant("DP row is empty".to_string()))
}

/// Column of `var` in `plan_id`'s output, if bound.
pub fn column_of(arena: &PlanArena, plan_id: PlanId, var: Var) -> Option<usize> {
    arena.get(plan_id).columns.get(&var).copied()
}
