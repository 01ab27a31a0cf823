//! Seed generator (§4.B): for each triple node, enumerate the candidate
//! leaf scans that can start a plan covering just that node.

use crate::operators::{NodeId, Operator, PlanId, SubtreePlan};
use crate::query_model::{TriplePattern, Var, VarOrTerm};
use crate::PlannerError;
use rdf_model::Node;
use rustc_hash::{FxHashMap, FxHashSet};
use storage::{Id, ScanVariant, TripleIndex};
use tracing::debug;

/// Resolves a fixed RDF term to the dictionary-encoded [`Id`] the storage
/// layer indexes on. Term→id dictionary encoding is the on-disk index
/// builder's job (§1, out of scope); this seam lets the planner consume
/// whatever encoding the embedding application already produced.
pub trait TermResolver {
    /// Resolve `term` to its dictionary id.
    fn resolve(&self, term: &Node<'static>) -> Id;
}

/// Generate the seed plans for one triple node, per §4.B's variable-count
/// cases.
///
/// - 0 variables is rejected (`NotYetImplemented`, per §7's taxonomy — the
///   planner has no representation for a fact pattern with no join
///   surface).
/// - 1 variable emits a single bound scan.
/// - 2 variables emits both free-scan orientations.
/// - ≥3 variables is rejected.
pub fn generate_seeds(
    node_id: NodeId,
    pattern: &TriplePattern,
    resolver: &dyn TermResolver,
    index: &dyn TripleIndex,
    context_vars: &FxHashSet<Var>,
) -> Result<Vec<SubtreePlan>, PlannerError> {
    let vars = pattern.variables();
    match vars.len() {
        0 => Err(PlannerError::NotYetImplemented(
            "triple pattern with no variables".to_string(),
        )),
        1 => Ok(vec![one_variable_seed(
            node_id, pattern, vars[0], resolver, index, context_vars,
        )?]),
        2 => two_variable_seeds(node_id, pattern, vars[0], vars[1], resolver, index, context_vars),
        _ => Err(PlannerError::NotYetImplemented(format!(
            "triple pattern with {} variables",
            vars.len()
        ))),
    }
}

fn predicate_id(
    pattern: &TriplePattern,
    resolver: &dyn TermResolver,
) -> Result<Id, PlannerError> {
    match pattern.predicate {
        VarOrTerm::Term(term) => Ok(resolver.resolve(&term)),
        VarOrTerm::Var(_) => Err(PlannerError::NotYetImplemented(
            "predicate-variable triple".to_string(),
        )),
    }
}

/// The subset of `var`'s plan columns that are context variables (§3),
/// i.e. the plan's share of `context_vars`.
fn reachable_context_vars(
    columns: &FxHashMap<Var, usize>,
    context_vars: &FxHashSet<Var>,
) -> FxHashSet<Var> {
    columns
        .keys()
        .filter(|v| context_vars.contains(v))
        .copied()
        .collect()
}

fn one_variable_seed(
    node_id: NodeId,
    pattern: &TriplePattern,
    var: Var,
    resolver: &dyn TermResolver,
    index: &dyn TripleIndex,
    context_vars: &FxHashSet<Var>,
) -> Result<SubtreePlan, PlannerError> {
    let predicate = predicate_id(pattern, resolver)?;

    let (variant, bound) = match (pattern.subject, pattern.object) {
        (VarOrTerm::Var(_), VarOrTerm::Term(o)) => (ScanVariant::PosBoundO, resolver.resolve(&o)),
        (VarOrTerm::Term(s), VarOrTerm::Var(_)) => (ScanVariant::PsoBoundS, resolver.resolve(&s)),
        _ => {
            return Err(PlannerError::Invariant(
                "one-variable seed called with neither subject nor object bound".to_string(),
            ))
        }
    };

    let size_estimate = index.size_estimate(variant, predicate, Some(bound));
    debug!(node_id, ?variant, size_estimate, "generated 1-variable seed");

    let mut columns = FxHashMap::default();
    columns.insert(var, 0);
    let plan_context_vars = reachable_context_vars(&columns, context_vars);

    Ok(SubtreePlan {
        root: Operator::Scan { variant, predicate, bound: Some(bound) },
        nodes: vec![node_id],
        applied_filters: FxHashSet::default(),
        columns,
        sorted_by: 0,
        context_vars: plan_context_vars,
        size_estimate,
        cost_estimate: size_estimate,
    })
}

fn two_variable_seeds(
    node_id: NodeId,
    pattern: &TriplePattern,
    subject_var: Var,
    object_var: Var,
    resolver: &dyn TermResolver,
    index: &dyn TripleIndex,
    context_vars: &FxHashSet<Var>,
) -> Result<Vec<SubtreePlan>, PlannerError> {
    let predicate = predicate_id(pattern, resolver)?;
    let size_estimate = index.size_estimate(ScanVariant::PsoFreeS, predicate, None);

    let mut cols_s_first = FxHashMap::default();
    cols_s_first.insert(subject_var, 0);
    cols_s_first.insert(object_var, 1);
    let pso_context_vars = reachable_context_vars(&cols_s_first, context_vars);
    let pso = SubtreePlan {
        root: Operator::Scan { variant: ScanVariant::PsoFreeS, predicate, bound: None },
        nodes: vec![node_id],
        applied_filters: FxHashSet::default(),
        columns: cols_s_first,
        sorted_by: 0,
        context_vars: pso_context_vars,
        size_estimate,
        cost_estimate: size_estimate,
    };

    let mut cols_o_first = FxHashMap::default();
    cols_o_first.insert(object_var, 0);
    cols_o_first.insert(subject_var, 1);
    let pos_context_vars = reachable_context_vars(&cols_o_first, context_vars);
    let pos = SubtreePlan {
        root: Operator::Scan { variant: ScanVariant::PosFreeO, predicate, bound: None },
        nodes: vec![node_id],
        applied_filters: FxHashSet::default(),
        columns: cols_o_first,
        sorted_by: 0,
        context_vars: pos_context_vars,
        size_estimate,
        cost_estimate: size_estimate,
    };

    debug!(node_id, size_estimate, "generated 2-variable seed pair");
    Ok(vec![pso, pos])
}

/// Insert a seed plan into the arena, returning its id — a thin helper so
/// callers building DP row 0 don't need to reach into `PlanArena`
/// directly (kept here rather than on `PlanArena` since only row 0 is
/// built this way).
pub fn insert_seed(arena: &mut crate::operators::PlanArena, plan: SubtreePlan) -> PlanId {
    arena.insert(plan)
}
