//! Parsed-query data model: triple patterns, filters, and the overall
//! `ParsedQuery` the planner consumes.
//!
//! Trimmed from a full SPARQL algebra down to the narrow shape this
//! planner actually needs: no property paths, no nested group graph
//! patterns, no aggregation beyond the verbatim-kept `SCORE(...)`
//! expression. Terms are `rdf_model::Node<'static>`/`Variable<'static>`
//! (interned via `rdf_model::Dictionary`) rather than a parallel
//! owned-`String` term type.

use rdf_model::{Node, Variable};
use rustc_hash::FxHashMap;

/// A query variable, interned for the lifetime of the enclosing
/// `Dictionary`.
pub type Var = Variable<'static>;

/// Either a variable or a fixed term (IRI, literal, or blank node)
/// occupying one position of a triple pattern or filter operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarOrTerm {
    /// A bound variable, resolved through the plan's variable→column map.
    Var(Var),
    /// A fixed term, known at plan time.
    Term(Node<'static>),
}

impl VarOrTerm {
    /// The variable this operand names, if it is one.
    pub fn as_var(&self) -> Option<Var> {
        match self {
            VarOrTerm::Var(v) => Some(*v),
            VarOrTerm::Term(_) => None,
        }
    }
}

/// Distinguished predicates that mark a triple as text-related (§4.A).
pub struct TextRelations;

impl TextRelations {
    /// Relates a context to the entity it mentions: `?c ql:in-context ?e`.
    pub const IN_CONTEXT_RELATION: &'static str =
        "http://qlever.cs.uni-freiburg.de/builtin-functions/in-context";
    /// Relates an entity or word to a context it occurs in.
    pub const HAS_CONTEXT_RELATION: &'static str =
        "http://qlever.cs.uni-freiburg.de/builtin-functions/has-context";
}

/// One (subject, predicate, object) triple pattern from the where-clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriplePattern {
    /// Subject position.
    pub subject: VarOrTerm,
    /// Predicate position.
    pub predicate: VarOrTerm,
    /// Object position.
    pub object: VarOrTerm,
}

impl TriplePattern {
    /// Create a new triple pattern.
    pub fn new(subject: VarOrTerm, predicate: VarOrTerm, object: VarOrTerm) -> Self {
        Self { subject, predicate, object }
    }

    /// Whether this pattern's predicate is one of the distinguished text
    /// relations.
    pub fn is_text_node(&self) -> bool {
        match self.predicate {
            VarOrTerm::Term(Node::Iri(iri)) => {
                iri.as_str() == TextRelations::IN_CONTEXT_RELATION
                    || iri.as_str() == TextRelations::HAS_CONTEXT_RELATION
            }
            _ => false,
        }
    }

    /// The distinct variables occurring in subject/predicate/object, in
    /// position order, without duplicates.
    pub fn variables(&self) -> Vec<Var> {
        let mut vars = Vec::with_capacity(3);
        for operand in [&self.subject, &self.predicate, &self.object] {
            if let VarOrTerm::Var(v) = operand {
                if !vars.contains(v) {
                    vars.push(*v);
                }
            }
        }
        vars
    }
}

/// A selected projection expression: a bare variable, or the verbatim
/// `SCORE(?subject|?context)` expression kept for the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectExpr {
    /// A plain selected variable.
    Plain(Var),
    /// `SCORE(?subject|?context)`, kept verbatim rather than desugared.
    Score {
        /// The entity/subject variable whose score is reported.
        subject: Var,
        /// The context variable the score is computed against.
        context: Var,
    },
}

/// Comparison operator used by a `Filter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// `=`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
}

/// A `FILTER(lhs OP rhs)` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Filter {
    /// Left-hand operand; always a variable, per §3's `lhs OP rhs` shape.
    pub lhs: Var,
    /// Comparison operator.
    pub op: CompareOp,
    /// Right-hand operand; a variable or a fixed term.
    pub rhs: VarOrTerm,
}

impl Filter {
    /// Whether this filter is fully applicable against `columns` — i.e.
    /// `lhs` is bound, and `rhs` is either bound or a fixed term (a fixed
    /// term is trivially "covered", it needs no lookup).
    ///
    /// This is the filter-pusher's applicability test (§4.E): invariant 3
    /// only requires both operands to be *resolvable*, which a constant
    /// term always is.
    pub fn is_applicable(&self, columns: &FxHashMap<Var, usize>) -> bool {
        if !columns.contains_key(&self.lhs) {
            return false;
        }
        match self.rhs {
            VarOrTerm::Var(v) => columns.contains_key(&v),
            VarOrTerm::Term(_) => true,
        }
    }
}

/// One `ORDER BY` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderKey {
    /// The variable to sort by.
    pub var: Var,
    /// Whether to sort descending.
    pub descending: bool,
}

/// A fully parsed query, as delivered by the (external) parser.
#[derive(Debug, Clone)]
pub struct ParsedQuery {
    /// Prefix table from the query's `PREFIX` declarations.
    pub prefixes: FxHashMap<String, String>,
    /// Selected variables/expressions, in projection order.
    pub select: Vec<SelectExpr>,
    /// Where-clause triple patterns.
    pub where_clause: Vec<TriplePattern>,
    /// `FILTER` clauses.
    pub filters: Vec<Filter>,
    /// `ORDER BY` keys, if present.
    pub order_by: Option<Vec<OrderKey>>,
    /// `LIMIT`, if present.
    pub limit: Option<u64>,
    /// `OFFSET`.
    pub offset: u64,
    /// `DISTINCT`.
    pub distinct: bool,
    /// `REDUCED`.
    pub reduced: bool,
}

impl ParsedQuery {
    /// The distinct variables selected (dropping `SCORE(...)` expressions'
    /// internal variables — only the plain selections participate in
    /// distinct-projection, per §4.F).
    pub fn selected_vars(&self) -> Vec<Var> {
        self.select
            .iter()
            .filter_map(|e| match e {
                SelectExpr::Plain(v) => Some(*v),
                SelectExpr::Score { .. } => None,
            })
            .collect()
    }
}
