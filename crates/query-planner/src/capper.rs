//! Final-result capping (§4.F): applying `ORDER BY` and `DISTINCT` to the
//! DP enumerator's chosen plan.

use crate::operators::{Operator, PlanArena, PlanId, SubtreePlan, UNSORTED};
use crate::query_model::{OrderKey, Var};

/// Cap `plan_id` with `order_by`, per §4.F:
///
/// - No keys: return the plan unchanged.
/// - A single ascending key already matching the child's `sortedBy`: reuse
///   the child verbatim (no-op elision, property 8).
/// - A single ascending key not matching: wrap in `Sort`.
/// - Anything else (descending, or more than one key): wrap in `OrderBy`
///   with a single multi-key comparator closure, leaving `sortedBy` as
///   [`UNSORTED`] since no single column describes the order.
pub fn cap_order_by(arena: &mut PlanArena, plan_id: PlanId, order_by: &[OrderKey]) -> PlanId {
    let Some(first) = order_by.first() else {
        return plan_id;
    };
    let plan = arena.get(plan_id).clone();

    if order_by.len() == 1 && !first.descending {
        let Some(&col) = plan.columns.get(&first.var) else {
            return plan_id;
        };
        if plan.sorted_by == col {
            return plan_id;
        }
        return arena.insert(SubtreePlan {
            root: Operator::Sort { child: plan_id, column: col },
            nodes: plan.nodes,
            applied_filters: plan.applied_filters,
            columns: plan.columns,
            sorted_by: col,
            context_vars: plan.context_vars,
            size_estimate: plan.size_estimate,
            cost_estimate: plan.cost_estimate + plan.size_estimate,
        });
    }

    let keys: Vec<(usize, bool)> = order_by
        .iter()
        .filter_map(|k| plan.columns.get(&k.var).map(|&c| (c, k.descending)))
        .collect();

    arena.insert(SubtreePlan {
        root: Operator::OrderBy { child: plan_id, keys },
        nodes: plan.nodes,
        applied_filters: plan.applied_filters,
        columns: plan.columns,
        sorted_by: UNSORTED,
        context_vars: plan.context_vars,
        size_estimate: plan.size_estimate,
        cost_estimate: plan.cost_estimate + plan.size_estimate,
    })
}

/// Cap `plan_id` with `DISTINCT` over `selected_vars`, per §4.F: project to
/// the selected-variable columns present in the plan's variable map, then
/// deduplicate. Variables not yet bound in `plan`'s column map (shouldn't
/// occur for a fully-joined final plan, but defensive against partial
/// plans in tests) are skipped rather than causing a panic.
pub fn cap_distinct(arena: &mut PlanArena, plan_id: PlanId, selected_vars: &[Var]) -> PlanId {
    let plan = arena.get(plan_id).clone();
    let columns: Vec<usize> = selected_vars
        .iter()
        .filter_map(|v| plan.columns.get(v).copied())
        .collect();

    arena.insert(SubtreePlan {
        root: Operator::Distinct { child: plan_id, columns },
        nodes: plan.nodes,
        applied_filters: plan.applied_filters,
        columns: plan.columns,
        sorted_by: plan.sorted_by,
        context_vars: plan.context_vars,
        size_estimate: plan.size_estimate,
        cost_estimate: plan.cost_estimate + plan.size_estimate,
    })
}
