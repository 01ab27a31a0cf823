//! The triple graph (§4.A): an undirected multigraph over triple
//! patterns, built on `hypergraph::Hypergraph`, plus the text-context
//! split that separates text-joined subgraphs from the plain join graph
//! the DP enumerator optimizes.

use crate::operators::NodeId;
use crate::query_model::{Filter, TriplePattern, Var};
use crate::PlannerError;
use hypergraph::Hypergraph;
use rustc_hash::{FxHashMap, FxHashSet};

/// One triple pattern as a node in the graph, plus one hyperedge per
/// distinct variable name connecting every node that references it
/// (§5.A). Built in one pass over the query's where-clause rather than
/// incrementally, since the full pattern list is known upfront.
pub struct TripleGraph {
    hg: Hypergraph,
    patterns: Vec<TriplePattern>,
}

impl TripleGraph {
    /// Build a triple graph from a where-clause's patterns, in input
    /// order (`node.id` equals its index into `patterns`, per §3).
    pub fn build(patterns: Vec<TriplePattern>) -> Self {
        let mut hg = Hypergraph::new();
        for _ in &patterns {
            hg.add_node();
        }

        let mut var_occurrences: FxHashMap<Var, Vec<NodeId>> = FxHashMap::default();
        for (i, pattern) in patterns.iter().enumerate() {
            for var in pattern.variables() {
                var_occurrences.entry(var).or_default().push(i as NodeId);
            }
        }
        for nodes in var_occurrences.values() {
            if nodes.len() >= 2 {
                hg.add_hyperedge(nodes.clone(), false);
            }
        }

        Self { hg, patterns }
    }

    /// Number of triple nodes.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the graph has no triple nodes.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// The pattern stored at `node`.
    pub fn pattern(&self, node: NodeId) -> &TriplePattern {
        &self.patterns[node as usize]
    }

    /// Nodes adjacent to `node` (sharing at least one variable).
    pub fn neighbors(&self, node: NodeId) -> FxHashSet<NodeId> {
        self.hg.get_neighbors(node)
    }

    /// Nodes whose predicate is a distinguished text relation.
    pub fn text_nodes(&self) -> FxHashSet<NodeId> {
        (0..self.patterns.len() as NodeId)
            .filter(|&n| self.pattern(n).is_text_node())
            .collect()
    }

    /// Variables that occur only in text nodes — the "context variables"
    /// a text-join subgraph splits on.
    pub fn context_variables(&self) -> FxHashSet<Var> {
        let text_nodes = self.text_nodes();
        let mut in_text: FxHashSet<Var> = FxHashSet::default();
        let mut in_non_text: FxHashSet<Var> = FxHashSet::default();
        for (i, pattern) in self.patterns.iter().enumerate() {
            let target = if text_nodes.contains(&(i as NodeId)) {
                &mut in_text
            } else {
                &mut in_non_text
            };
            for var in pattern.variables() {
                target.insert(var);
            }
        }
        in_text.difference(&in_non_text).copied().collect()
    }

    /// BFS over the graph starting at `start`, never visiting a node in
    /// `leave_out`. Resolves the open question left by the source's empty
    /// `bfsLeaveOut`/`TripleGraph(other, keepNodes)` stubs (§9): this is a
    /// real traversal that enumerates every node reachable from `start`
    /// without crossing the leave-out set, used to find one connected
    /// component of the non-text subgraph at a time.
    pub fn bfs_leave_out(&self, start: NodeId, leave_out: &FxHashSet<NodeId>) -> Vec<NodeId> {
        if leave_out.contains(&start) {
            return Vec::new();
        }
        let mut visited = FxHashSet::default();
        let mut queue = std::collections::VecDeque::new();
        let mut order = Vec::new();

        visited.insert(start);
        queue.push_back(start);
        while let Some(node) = queue.pop_front() {
            order.push(node);
            for neighbor in self.neighbors(node) {
                if leave_out.contains(&neighbor) || visited.contains(&neighbor) {
                    continue;
                }
                visited.insert(neighbor);
                queue.push_back(neighbor);
            }
        }
        order
    }

    /// Filters whose every operand variable is covered by `kept_nodes`
    /// (i.e. appears in some pattern among `kept_nodes`). Resolves the
    /// open question left by the source's empty `pickFilters` stub (§9).
    pub fn pick_filters(&self, filters: &[Filter], kept_nodes: &FxHashSet<NodeId>) -> Vec<usize> {
        let mut covered_vars: FxHashSet<Var> = FxHashSet::default();
        for &node in kept_nodes {
            covered_vars.extend(self.pattern(node).variables());
        }
        filters
            .iter()
            .enumerate()
            .filter(|(_, f)| {
                covered_vars.contains(&f.lhs)
                    && match f.rhs.as_var() {
                        Some(v) => covered_vars.contains(&v),
                        None => true,
                    }
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// The non-text subgraph: connected components obtained by BFS over
    /// non-text nodes avoiding the text-node set. Per §4.A, a single
    /// non-empty component is the common case handed to the DP enumerator;
    /// more than one component means a multi-way text join the planner
    /// does not support yet.
    pub fn non_text_components(&self) -> Result<Vec<Vec<NodeId>>, PlannerError> {
        let text_nodes = self.text_nodes();
        let mut remaining: FxHashSet<NodeId> = (0..self.patterns.len() as NodeId)
            .filter(|n| !text_nodes.contains(n))
            .collect();

        let mut components = Vec::new();
        while let Some(&start) = remaining.iter().next() {
            let component = self.bfs_leave_out(start, &text_nodes);
            for &n in &component {
                remaining.remove(&n);
            }
            components.push(component);
        }
        Ok(components)
    }

    /// Build a new graph containing only `keep_nodes`' patterns, with node
    /// ids remapped to a fresh contiguous `0..keep_nodes.len()` range in
    /// the order given. Resolves the source's empty copy-ctor
    /// `TripleGraph(other, keepNodes)` stub (§9): a real subgraph view,
    /// used to scope the DP enumerator to one connected component of the
    /// non-text subgraph.
    pub fn restrict(&self, keep_nodes: &[NodeId]) -> TripleGraph {
        let patterns = keep_nodes.iter().map(|&n| *self.pattern(n)).collect();
        TripleGraph::build(patterns)
    }

    /// The subgraph the DP enumerator should actually plan over, per
    /// §4.A: no text nodes at all means the whole graph already is the
    /// non-text subgraph; exactly one non-text component means that
    /// component (text nodes themselves are excluded — they are folded in
    /// by the full-text algorithms outside this core's plan tree, not by
    /// a scan/join operator); more than one component is the multi-way
    /// text join this core does not support.
    pub fn for_planning(&self) -> Result<TripleGraph, PlannerError> {
        if self.text_nodes().is_empty() {
            let all: Vec<NodeId> = (0..self.patterns.len() as NodeId).collect();
            return Ok(self.restrict(&all));
        }
        let mut components = self.non_text_components()?;
        match components.len() {
            0 => Err(PlannerError::Invariant(
                "text split produced no non-text component".to_string(),
            )),
            1 => Ok(self.restrict(&components.remove(0))),
            _ => Err(PlannerError::NotYetImplemented(
                "text subgraph split into more than one non-text component".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query_model::{CompareOp, VarOrTerm};
    use rdf_model::{Dictionary, Node, Variable};

    fn leak(dict: &Dictionary, s: &str) -> &'static str {
        dict.intern(s)
    }

    #[test]
    fn two_triples_sharing_a_variable_are_adjacent() {
        let dict = Dictionary::new();
        let x = Variable::new(leak(&dict, "x"));
        let y = Variable::new(leak(&dict, "y"));
        let z = Variable::new(leak(&dict, "z"));
        let rel = Node::iri(leak(&dict, "http://example.org/rel"));

        let t1 = TriplePattern::new(VarOrTerm::Var(x), VarOrTerm::Term(rel), VarOrTerm::Var(y));
        let t2 = TriplePattern::new(VarOrTerm::Var(y), VarOrTerm::Term(rel), VarOrTerm::Var(z));
        let graph = TripleGraph::build(vec![t1, t2]);

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.neighbors(0), [1].into_iter().collect());
        assert_eq!(graph.neighbors(1), [0].into_iter().collect());
    }

    #[test]
    fn disjoint_triples_have_no_adjacency() {
        let dict = Dictionary::new();
        let x = Variable::new(leak(&dict, "x"));
        let y = Variable::new(leak(&dict, "y"));
        let rel = Node::iri(leak(&dict, "http://example.org/rel"));

        let t1 = TriplePattern::new(VarOrTerm::Var(x), VarOrTerm::Term(rel), VarOrTerm::Term(rel));
        let t2 = TriplePattern::new(VarOrTerm::Var(y), VarOrTerm::Term(rel), VarOrTerm::Term(rel));
        let graph = TripleGraph::build(vec![t1, t2]);

        assert!(graph.neighbors(0).is_empty());
        assert!(graph.neighbors(1).is_empty());
    }

    #[test]
    fn bfs_leave_out_never_crosses_the_leave_out_set() {
        let dict = Dictionary::new();
        let x = Variable::new(leak(&dict, "x"));
        let y = Variable::new(leak(&dict, "y"));
        let z = Variable::new(leak(&dict, "z"));
        let rel = Node::iri(leak(&dict, "http://example.org/rel"));

        // 0 -x- 1 -y- 2, with node 1 as the text node to avoid.
        let t0 = TriplePattern::new(VarOrTerm::Var(x), VarOrTerm::Term(rel), VarOrTerm::Term(rel));
        let t1 = TriplePattern::new(VarOrTerm::Var(x), VarOrTerm::Term(rel), VarOrTerm::Var(y));
        let t2 = TriplePattern::new(VarOrTerm::Var(y), VarOrTerm::Term(rel), VarOrTerm::Var(z));
        let graph = TripleGraph::build(vec![t0, t1, t2]);

        let leave_out: FxHashSet<NodeId> = [1].into_iter().collect();
        let mut reached = graph.bfs_leave_out(0, &leave_out);
        reached.sort_unstable();
        assert_eq!(reached, vec![0]);
    }

    #[test]
    fn pick_filters_keeps_only_fully_covered_filters() {
        let dict = Dictionary::new();
        let x = Variable::new(leak(&dict, "x"));
        let y = Variable::new(leak(&dict, "y"));
        let z = Variable::new(leak(&dict, "z"));
        let rel = Node::iri(leak(&dict, "http://example.org/rel"));

        let t0 = TriplePattern::new(VarOrTerm::Var(x), VarOrTerm::Term(rel), VarOrTerm::Var(y));
        let graph = TripleGraph::build(vec![t0]);

        let covered_filter = Filter { lhs: x, op: CompareOp::Ne, rhs: VarOrTerm::Var(y) };
        let uncovered_filter = Filter { lhs: x, op: CompareOp::Ne, rhs: VarOrTerm::Var(z) };
        let kept: FxHashSet<NodeId> = [0].into_iter().collect();

        let picked = graph.pick_filters(&[covered_filter, uncovered_filter], &kept);
        assert_eq!(picked, vec![0]);
    }

    #[test]
    fn context_variables_are_those_seen_only_in_text_nodes() {
        let dict = Dictionary::new();
        let c = Variable::new(leak(&dict, "c"));
        let e = Variable::new(leak(&dict, "e"));
        let x = Variable::new(leak(&dict, "x"));
        let rel = Node::iri(leak(&dict, "http://example.org/rel"));
        let in_context =
            Node::iri(crate::query_model::TextRelations::IN_CONTEXT_RELATION);

        let text = TriplePattern::new(VarOrTerm::Var(c), VarOrTerm::Term(in_context), VarOrTerm::Var(e));
        let plain = TriplePattern::new(VarOrTerm::Var(e), VarOrTerm::Term(rel), VarOrTerm::Var(x));
        let graph = TripleGraph::build(vec![text, plain]);

        // `e` appears in both a text and a non-text node, so it is not a
        // context variable; `c` appears only in the text node.
        assert_eq!(graph.context_variables(), [c].into_iter().collect());
    }

    #[test]
    fn single_component_is_the_common_case() {
        let dict = Dictionary::new();
        let x = Variable::new(leak(&dict, "x"));
        let y = Variable::new(leak(&dict, "y"));
        let rel = Node::iri(leak(&dict, "http://example.org/rel"));
        let t0 = TriplePattern::new(VarOrTerm::Var(x), VarOrTerm::Term(rel), VarOrTerm::Var(y));
        let graph = TripleGraph::build(vec![t0]);

        let components = graph.non_text_components().unwrap();
        assert_eq!(components.len(), 1);
    }

    #[test]
    fn restrict_remaps_ids_to_a_contiguous_range() {
        let dict = Dictionary::new();
        let x = Variable::new(leak(&dict, "x"));
        let y = Variable::new(leak(&dict, "y"));
        let z = Variable::new(leak(&dict, "z"));
        let rel = Node::iri(leak(&dict, "http://example.org/rel"));

        let t0 = TriplePattern::new(VarOrTerm::Var(x), VarOrTerm::Term(rel), VarOrTerm::Var(y));
        let t1 = TriplePattern::new(VarOrTerm::Var(y), VarOrTerm::Term(rel), VarOrTerm::Var(z));
        let t2 = TriplePattern::new(VarOrTerm::Var(z), VarOrTerm::Term(rel), VarOrTerm::Term(rel));
        let graph = TripleGraph::build(vec![t0, t1, t2]);

        let sub = graph.restrict(&[1, 2]);
        assert_eq!(sub.len(), 2);
        assert_eq!(sub.pattern(0), &t1);
        assert_eq!(sub.pattern(1), &t2);
    }

    #[test]
    fn for_planning_is_the_whole_graph_when_there_are_no_text_nodes() {
        let dict = Dictionary::new();
        let x = Variable::new(leak(&dict, "x"));
        let y = Variable::new(leak(&dict, "y"));
        let rel = Node::iri(leak(&dict, "http://example.org/rel"));
        let t0 = TriplePattern::new(VarOrTerm::Var(x), VarOrTerm::Term(rel), VarOrTerm::Var(y));
        let graph = TripleGraph::build(vec![t0]);

        let planning_graph = graph.for_planning().unwrap();
        assert_eq!(planning_graph.len(), 1);
    }

    #[test]
    fn for_planning_drops_text_nodes_when_exactly_one_non_text_component_remains() {
        let dict = Dictionary::new();
        let c = Variable::new(leak(&dict, "c"));
        let e = Variable::new(leak(&dict, "e"));
        let x = Variable::new(leak(&dict, "x"));
        let rel = Node::iri(leak(&dict, "http://example.org/rel"));
        let in_context = Node::iri(crate::query_model::TextRelations::IN_CONTEXT_RELATION);

        let text = TriplePattern::new(VarOrTerm::Var(c), VarOrTerm::Term(in_context), VarOrTerm::Var(e));
        let plain = TriplePattern::new(VarOrTerm::Var(e), VarOrTerm::Term(rel), VarOrTerm::Var(x));
        let graph = TripleGraph::build(vec![text, plain]);

        let planning_graph = graph.for_planning().unwrap();
        assert_eq!(planning_graph.len(), 1);
        assert_eq!(planning_graph.pattern(0), &plain);
    }

    #[test]
    fn for_planning_rejects_multiple_non_text_components() {
        let dict = Dictionary::new();
        let c1 = Variable::new(leak(&dict, "c1"));
        let c2 = Variable::new(leak(&dict, "c2"));
        let e1 = Variable::new(leak(&dict, "e1"));
        let e2 = Variable::new(leak(&dict, "e2"));
        let x = Variable::new(leak(&dict, "x"));
        let y = Variable::new(leak(&dict, "y"));
        let rel = Node::iri(leak(&dict, "http://example.org/rel"));
        let in_context = Node::iri(crate::query_model::TextRelations::IN_CONTEXT_RELATION);

        // Two text nodes on disjoint context variables, each bridging a
        // separate, otherwise-unconnected plain triple.
        let text1 = TriplePattern::new(VarOrTerm::Var(c1), VarOrTerm::Term(in_context), VarOrTerm::Var(e1));
        let text2 = TriplePattern::new(VarOrTerm::Var(c2), VarOrTerm::Term(in_context), VarOrTerm::Var(e2));
        let plain1 = TriplePattern::new(VarOrTerm::Var(e1), VarOrTerm::Term(rel), VarOrTerm::Var(x));
        let plain2 = TriplePattern::new(VarOrTerm::Var(e2), VarOrTerm::Term(rel), VarOrTerm::Var(y));
        let graph = TripleGraph::build(vec![text1, text2, plain1, plain2]);

        let err = graph.for_planning().unwrap_err();
        assert!(matches!(err, PlannerError::NotYetImplemented(_)));
    }
}
