//! Plan merger (§4.C/§4.D): combine two disjoint-but-connected subtree
//! plans into one join plan, pre-sorting children as needed and compacting
//! the result by pruning key.

use crate::operators::{NodeId, Operator, PlanArena, PlanId, SubtreePlan};
use crate::query_model::Var;
use crate::triple_graph::TripleGraph;
use crate::PlannerError;
use rustc_hash::{FxHashMap, FxHashSet};

/// Whether two plans cover disjoint node sets and are connected in the
/// triple graph (some node of one is adjacent to some node of the other).
/// Both conditions must hold for a merge to be considered at all (§4.C).
pub fn mergeable(graph: &TripleGraph, left: &SubtreePlan, right: &SubtreePlan) -> bool {
    let left_nodes: FxHashSet<NodeId> = left.nodes.iter().copied().collect();
    let right_nodes: FxHashSet<NodeId> = right.nodes.iter().copied().collect();
    if !left_nodes.is_disjoint(&right_nodes) {
        return false;
    }
    left_nodes
        .iter()
        .any(|&n| !graph.neighbors(n).is_disjoint(&right_nodes))
}

/// The single shared variable `left` and `right` would join on, if exactly
/// one exists. More than one shared variable is a multi-column join this
/// planner does not support (§4.C, `NotYetImplemented`); zero shared
/// variables means the caller shouldn't have tried to merge at all.
fn join_variable(left: &SubtreePlan, right: &SubtreePlan) -> Result<Var, PlannerError> {
    let shared: Vec<Var> = left
        .columns
        .keys()
        .filter(|v| right.columns.contains_key(v))
        .copied()
        .collect();
    match shared.as_slice() {
        [] => Err(PlannerError::Invariant(
            "merge attempted on plans with no shared variable".to_string(),
        )),
        [v] => Ok(*v),
        _ => Err(PlannerError::NotYetImplemented(
            "multi-column join".to_string(),
        )),
    }
}

/// Ensure `plan` is sorted on `column`: reuse it verbatim if already
/// `sortedBy == column`, otherwise wrap it in a `Sort` operator (§4.C's
/// pre-sort step for sort-merge join).
fn ensure_sorted(arena: &mut PlanArena, plan_id: PlanId, column: usize) -> PlanId {
    let plan = arena.get(plan_id).clone();
    if plan.sorted_by == column {
        return plan_id;
    }
    arena.insert(SubtreePlan {
        root: Operator::Sort { child: plan_id, column },
        nodes: plan.nodes,
        applied_filters: plan.applied_filters,
        columns: plan.columns,
        sorted_by: column,
        context_vars: plan.context_vars,
        size_estimate: plan.size_estimate,
        cost_estimate: plan.cost_estimate + plan.size_estimate,
    })
}

/// Merge `left` and `right` into one join plan, per §4.C/§9: output
/// columns are left's columns in order, then right's columns with the
/// join column removed, re-indexed contiguously. `appliedFilters` of the
/// result is the union of both children's (§9's explicit resolution —
/// not the source's left-only copy, since a filter pushed into either
/// child is equally satisfied in the merged plan).
pub fn merge(
    arena: &mut PlanArena,
    left_id: PlanId,
    right_id: PlanId,
) -> Result<PlanId, PlannerError> {
    let left = arena.get(left_id).clone();
    let right = arena.get(right_id).clone();
    let join_var = join_variable(&left, &right)?;

    let left_col = left.columns[&join_var];
    let right_col = right.columns[&join_var];

    let sorted_left = ensure_sorted(arena, left_id, left_col);
    let sorted_right = ensure_sorted(arena, right_id, right_col);
    let left = arena.get(sorted_left).clone();
    let right = arena.get(sorted_right).clone();

    let mut columns = FxHashMap::default();
    for (var, &col) in &left.columns {
        columns.insert(*var, col);
    }
    let left_width = left.columns.len();
    let mut right_non_join: Vec<(Var, usize)> = right
        .columns
        .iter()
        .filter(|(var, _)| **var != join_var)
        .map(|(var, &col)| (*var, col))
        .collect();
    right_non_join.sort_unstable_by_key(|&(_, col)| col);
    for (i, (var, _)) in right_non_join.into_iter().enumerate() {
        columns.insert(var, left_width + i);
    }

    let mut nodes = left.nodes.clone();
    nodes.extend(right.nodes.iter().copied());
    nodes.sort_unstable();

    let applied_filters: FxHashSet<_> = left
        .applied_filters
        .union(&right.applied_filters)
        .copied()
        .collect();
    let context_vars: FxHashSet<_> = left
        .context_vars
        .union(&right.context_vars)
        .copied()
        .collect();

    let size_estimate = left.size_estimate.max(right.size_estimate);
    let cost_estimate = left.cost_estimate + right.cost_estimate + size_estimate;

    let plan = SubtreePlan {
        root: Operator::Join {
            left: sorted_left,
            right: sorted_right,
            left_col,
            right_col,
        },
        nodes,
        applied_filters,
        columns,
        sorted_by: left_col,
        context_vars,
        size_estimate,
        cost_estimate,
    };
    Ok(arena.insert(plan))
}

/// Compact a row of candidate plans by pruning key (§4.D, invariant 4):
/// keep only the lowest-cost plan for each distinct key.
pub fn prune(arena: &PlanArena, candidates: Vec<PlanId>) -> Vec<PlanId> {
    let mut best: FxHashMap<String, PlanId> = FxHashMap::default();
    for id in candidates {
        let plan = arena.get(id);
        let key = plan.pruning_key();
        match best.get(&key) {
            Some(&existing) if arena.get(existing).cost_estimate <= plan.cost_estimate => {}
            _ => {
                best.insert(key, id);
            }
        }
    }
    best.into_values().collect()
}
