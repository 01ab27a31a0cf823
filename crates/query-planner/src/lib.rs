//! Dynamic-programming join enumerator for a read-only triple-store query
//! engine with full-text search primitives.
//!
//! Pipeline (§2): a parsed query's where-clause is built into a
//! [`triple_graph::TripleGraph`] (splitting off a text-context subgraph via
//! [`TripleGraph::for_planning`](triple_graph::TripleGraph::for_planning)),
//! [`dp::enumerate_plans`] seeds row 0 via [`seeds`] and builds rows
//! `1..n` via [`merger`], pushing filters through [`filter_pusher`] after
//! every row, and finally [`capper`] appends order-by/distinct on the
//! cheapest final-row plan. [`operators`] is the arena-backed plan tree
//! those stages build; [`result_table`] is the evaluator-facing row
//! container the plan ultimately produces.

#![warn(rust_2018_idioms)]

pub mod capper;
pub mod dp;
pub mod error;
pub mod filter_pusher;
pub mod merger;
pub mod operators;
pub mod query_model;
pub mod result_table;
pub mod seeds;
pub mod triple_graph;

pub use error::{PlannerError, PlannerResult};
pub use operators::{Operator, PlanArena, PlanId, SubtreePlan};
pub use query_model::{
    CompareOp, Filter, OrderKey, ParsedQuery, SelectExpr, TextRelations, TriplePattern, Var,
    VarOrTerm,
};
pub use result_table::ResultTable;
pub use seeds::TermResolver;
pub use triple_graph::TripleGraph;

/// Plan a parsed query end to end (§2's full pipeline): build the triple
/// graph and scope it to the subgraph the DP enumerator can plan over
/// (§4.A), enumerate join plans bottom-up with filters pushed eagerly
/// after every row (§4.C/§4.E), then cap the cheapest final-row plan with
/// `ORDER BY`/`DISTINCT` (§4.F).
///
/// `resolver` and `index` are the seams onto the external term dictionary
/// and on-disk index (§6) — neither is this crate's concern beyond the
/// trait shape it consumes.
///
/// Returns the selected [`PlanId`] into `arena`, ready for the (external)
/// evaluator to walk bottom-up.
pub fn plan_query(
    query: &query_model::ParsedQuery,
    resolver: &dyn seeds::TermResolver,
    index: &dyn storage::TripleIndex,
    arena: &mut operators::PlanArena,
) -> error::PlannerResult<operators::PlanId> {
    let graph = triple_graph::TripleGraph::build(query.where_clause.clone());
    let context_vars = graph.context_variables();
    let planning_graph = graph.for_planning()?;

    let rows = dp::enumerate_plans(
        arena,
        &planning_graph,
        &query.filters,
        resolver,
        index,
        &context_vars,
    )?;
    let last_row = rows
        .last()
        .ok_or_else(|| error::PlannerError::Invariant("DP table has no rows".to_string()))?;
    if last_row.is_empty() {
        return Err(error::PlannerError::Invariant(
            "final DP row is empty".to_string(),
        ));
    }

    let final_row: Vec<operators::PlanId> = match &query.order_by {
        Some(order_by) => last_row
            .iter()
            .map(|&id| capper::cap_order_by(arena, id, order_by))
            .collect(),
        None => last_row.clone(),
    };

    let cheapest_id = dp::cheapest(arena, &final_row)?;

    let selected_vars = query.selected_vars();
    let final_plan = if query.distinct {
        capper::cap_distinct(arena, cheapest_id, &selected_vars)
    } else {
        cheapest_id
    };

    Ok(final_plan)
}
