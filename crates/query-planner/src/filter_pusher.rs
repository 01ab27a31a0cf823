//! Filter pusher (§4.E): wrap a plan in `Filter` operators for every
//! not-yet-applied filter whose operands it now fully covers.

use crate::operators::{FilterId, FilterRhs, Operator, PlanArena, PlanId, SubtreePlan};
use crate::query_model::{Filter, VarOrTerm};

/// Apply every filter in `filters` that `plan` covers and has not already
/// applied, wrapping it once per applicable filter. Idempotent: calling
/// this again on the returned plan id is a no-op, since every filter it
/// could apply is already recorded in `applied_filters` (property 7).
pub fn push_filters(
    arena: &mut PlanArena,
    plan_id: PlanId,
    filters: &[Filter],
) -> PlanId {
    let mut current = plan_id;
    for (filter_id, filter) in filters.iter().enumerate() {
        let plan = arena.get(current);
        if plan.applied_filters.contains(&filter_id) {
            continue;
        }
        if !filter.is_applicable(&plan.columns) {
            continue;
        }
        current = apply_one(arena, current, filter_id, filter);
    }
    current
}

fn apply_one(
    arena: &mut PlanArena,
    plan_id: PlanId,
    filter_id: FilterId,
    filter: &Filter,
) -> PlanId {
    let plan = arena.get(plan_id).clone();
    let lhs_col = plan.columns[&filter.lhs];
    let rhs = match filter.rhs {
        VarOrTerm::Var(v) => FilterRhs::Column(plan.columns[&v]),
        VarOrTerm::Term(t) => FilterRhs::Term(t),
    };

    let mut applied_filters = plan.applied_filters.clone();
    applied_filters.insert(filter_id);

    arena.insert(SubtreePlan {
        root: Operator::Filter { child: plan_id, lhs_col, op: filter.op, rhs },
        nodes: plan.nodes,
        applied_filters,
        columns: plan.columns,
        sorted_by: plan.sorted_by,
        context_vars: plan.context_vars,
        size_estimate: plan.size_estimate,
        cost_estimate: plan.cost_estimate + plan.size_estimate,
    })
}
