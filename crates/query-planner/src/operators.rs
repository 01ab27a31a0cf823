//! The plan tree: a tagged-variant `Operator` sum type stored in an
//! arena, referenced by index rather than by pointer (§9 "Plan ownership
//! and sharing").
//!
//! A `PlanId` is an index into a `PlanArena`; a `SubtreePlan` is an
//! immutable record pairing one `Operator` with the bookkeeping the DP
//! enumerator and merger need (covered nodes, applied filters, variable
//! map, sort column, context variables, size/cost estimates). Cloning a
//! reference to a plan is just copying a `usize`; there is no possibility
//! of a cycle, since every `Operator` variant can only reference `PlanId`s
//! already present in the arena.

use crate::query_model::{CompareOp, Var};
use rdf_model::Node;
use rustc_hash::{FxHashMap, FxHashSet};
pub use storage::{Id, ScanVariant};

/// Index into a [`PlanArena`].
pub type PlanId = usize;

/// Index of a node in the triple graph (§4.A) — the same id space
/// `hypergraph::Hypergraph` assigns its nodes, since the triple graph is
/// built directly on top of one.
pub type NodeId = hypergraph::NodeId;

/// Index of a filter in the parsed query's filter list.
pub type FilterId = usize;

/// Sentinel `sortedBy` value meaning "no single column is sorted" (used by
/// `OrderBy`, per §4.F).
pub const UNSORTED: usize = usize::MAX;

/// Either a column index (a variable bound elsewhere in the plan) or a
/// fixed term, as a `Filter`'s right-hand side may be either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterRhs {
    /// A column already present in the child's variable map.
    Column(usize),
    /// A constant term compared directly, never requiring a column.
    Term(Node<'static>),
}

/// One node of the plan tree. Operands reference sibling plans by
/// `PlanId`, never by value — the tree is really a DAG-shaped arena with
/// tree semantics imposed by construction (every `PlanId` referenced by an
/// operator was inserted strictly before it).
#[derive(Debug, Clone)]
pub enum Operator {
    /// A leaf index scan. `bound` is `Some` for `PosBoundO`/`PsoBoundS`.
    Scan {
        /// Which scan variant this leaf performs.
        variant: ScanVariant,
        /// The fixed predicate id.
        predicate: Id,
        /// The bound subject/object id, for the bound variants.
        bound: Option<Id>,
    },
    /// Single-column sort of `child`.
    Sort {
        /// The plan being sorted.
        child: PlanId,
        /// The column sorted on.
        column: usize,
    },
    /// Sort-merge join of `left` and `right` on `left_col`/`right_col`.
    /// Output columns are left's columns in order, then right's columns
    /// with the join column removed, re-indexed contiguously (§9's
    /// explicit resolution of the source's ambiguous column shift).
    Join {
        /// Left child.
        left: PlanId,
        /// Right child.
        right: PlanId,
        /// Join column in the left child.
        left_col: usize,
        /// Join column in the right child.
        right_col: usize,
    },
    /// Binary comparison on one column of `child` against either another
    /// column or a fixed term.
    Filter {
        /// The plan being filtered.
        child: PlanId,
        /// The left-hand column.
        lhs_col: usize,
        /// Comparison operator.
        op: CompareOp,
        /// The right-hand operand.
        rhs: FilterRhs,
    },
    /// Multi-key sort by `(column, descending)` pairs, using a single
    /// comparator closure over the whole key list (§10, from
    /// `OrderBy.h`) rather than one stable sort per key.
    OrderBy {
        /// The plan being ordered.
        child: PlanId,
        /// Sort keys, most significant first.
        keys: Vec<(usize, bool)>,
    },
    /// Projection to `columns` followed by duplicate elimination.
    Distinct {
        /// The plan being projected.
        child: PlanId,
        /// Columns retained, in output order.
        columns: Vec<usize>,
    },
}

/// An immutable execution-plan record: one `Operator` plus the
/// bookkeeping the DP enumerator, merger, and filter pusher consume.
#[derive(Debug, Clone)]
pub struct SubtreePlan {
    /// The operator at this plan's root.
    pub root: Operator,
    /// Triple-graph node ids this plan covers, sorted ascending.
    pub nodes: Vec<NodeId>,
    /// Filter ids already applied somewhere in this plan's chain.
    pub applied_filters: FxHashSet<FilterId>,
    /// Variable → output-column map.
    pub columns: FxHashMap<Var, usize>,
    /// Column this plan's output is sorted on, or [`UNSORTED`].
    pub sorted_by: usize,
    /// Context variables (§4.A) reachable from this plan's root.
    pub context_vars: FxHashSet<Var>,
    /// Estimated number of output rows.
    pub size_estimate: u64,
    /// Estimated cost, used to pick the cheapest plan per pruning key.
    pub cost_estimate: u64,
}

impl SubtreePlan {
    /// The pruning key from §4.D: the name of the variable whose column
    /// equals `sortedBy`, followed by the covered node ids in ascending
    /// order. Plans with no sorted column (`UNSORTED`) key on the literal
    /// marker so they still compete within their own equivalence class.
    pub fn pruning_key(&self) -> String {
        let sort_var_name = if self.sorted_by == UNSORTED {
            "UNSORTED"
        } else {
            self.columns
                .iter()
                .find(|(_, &col)| col == self.sorted_by)
                .map(|(v, _)| v.name())
                .unwrap_or("UNSORTED")
        };
        let mut nodes = self.nodes.clone();
        nodes.sort_unstable();
        let nodes_str = nodes
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(",");
        format!("{sort_var_name} {nodes_str}")
    }
}

/// Owning store of plan nodes, indexed by [`PlanId`]. Plans are inserted
/// strictly bottom-up; a plan never references a `PlanId` greater than
/// its own.
#[derive(Debug, Clone, Default)]
pub struct PlanArena {
    plans: Vec<SubtreePlan>,
}

impl PlanArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a plan, returning its new id.
    pub fn insert(&mut self, plan: SubtreePlan) -> PlanId {
        self.plans.push(plan);
        self.plans.len() - 1
    }

    /// Look up a plan by id.
    pub fn get(&self, id: PlanId) -> &SubtreePlan {
        &self.plans[id]
    }

    /// Number of plans stored so far.
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    /// Whether the arena holds no plans.
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}
