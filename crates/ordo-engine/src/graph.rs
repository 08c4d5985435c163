//! Dependency graph construction from declared constraints.

use std::collections::{HashMap, HashSet};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use ordo_core::unit::{ConstraintKind, Unit};

use crate::cache::FixedOrderCache;
use crate::report::{SortDiagnostic, SortReport};

/// Directed dependency graph over one sort's unit set, backed by petgraph.
///
/// An edge `u -> d` means "u depends on d": d must be ordered strictly
/// before u. Nodes are inserted in the deterministic input sequence (fixed
/// priority ascending, then module id), so iterating nodes in index order
/// is the pre-sorted order the visitor and assigner rely on.
pub struct DependencyGraph {
    graph: DiGraph<Unit, ()>,
    /// Lookup from module id to node index.
    index: HashMap<String, NodeIndex>,
    /// Per-node fixed priority, resolved once through the cache.
    fixed: Vec<Option<i32>>,
}

impl DependencyGraph {
    /// Build the graph for one sort pass.
    ///
    /// Constraints are normalized to dependency edges: `After(t)` on `u`
    /// adds `u -> t`, `Before(t)` on `u` adds `t -> u`. Constraints naming
    /// an absent target are dropped with a warning, self references are
    /// dropped, and duplicate targets from one unit are deduplicated with
    /// the first occurrence winning.
    pub fn build(units: Vec<Unit>, cache: &mut FixedOrderCache, report: &mut SortReport) -> Self {
        let mut keyed: Vec<(Option<i32>, Unit)> = units
            .into_iter()
            .map(|unit| (cache.fixed_order(&unit), unit))
            .collect();
        keyed.sort_by(|a, b| {
            a.0.unwrap_or(0)
                .cmp(&b.0.unwrap_or(0))
                .then_with(|| a.1.module_id.cmp(&b.1.module_id))
        });

        let mut graph = DiGraph::new();
        let mut index = HashMap::new();
        let mut fixed = Vec::with_capacity(keyed.len());
        for (fixed_order, unit) in keyed {
            let module_id = unit.module_id.clone();
            let idx = graph.add_node(unit);
            index.insert(module_id, idx);
            fixed.push(fixed_order);
        }

        let mut this = Self {
            graph,
            index,
            fixed,
        };

        let nodes: Vec<NodeIndex> = this.graph.node_indices().collect();
        for &u_idx in &nodes {
            let unit_id = this.graph[u_idx].module_id.clone();
            let constraints = this.graph[u_idx].constraints.clone();
            let mut seen: HashSet<&str> = HashSet::new();
            for constraint in &constraints {
                if !seen.insert(constraint.relative_to.as_str()) {
                    continue;
                }
                if constraint.relative_to == unit_id {
                    continue;
                }
                let Some(&t_idx) = this.index.get(&constraint.relative_to) else {
                    tracing::warn!(
                        "Constraint target {} not found for {unit_id}",
                        constraint.relative_to
                    );
                    report.push(SortDiagnostic::UnresolvedTarget {
                        unit: unit_id.clone(),
                        target: constraint.relative_to.clone(),
                    });
                    continue;
                };
                match constraint.kind {
                    ConstraintKind::After => this.add_edge(u_idx, t_idx),
                    ConstraintKind::Before => this.add_edge(t_idx, u_idx),
                }
            }
        }

        this
    }

    /// Add a dependency edge unless it already exists.
    fn add_edge(&mut self, from: NodeIndex, to: NodeIndex) {
        if !self.graph.edges(from).any(|e| e.target() == to) {
            self.graph.add_edge(from, to, ());
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// All nodes in input-sequence order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeIndex> {
        self.graph.node_indices()
    }

    /// Look up a node by module id.
    pub fn find(&self, module_id: &str) -> Option<NodeIndex> {
        self.index.get(module_id).copied()
    }

    pub fn unit(&self, idx: NodeIndex) -> &Unit {
        &self.graph[idx]
    }

    pub fn module_id(&self, idx: NodeIndex) -> &str {
        &self.graph[idx].module_id
    }

    pub fn fixed_priority(&self, idx: NodeIndex) -> Option<i32> {
        self.fixed[idx.index()]
    }

    pub fn has_fixed(&self, idx: NodeIndex) -> bool {
        self.fixed[idx.index()].is_some()
    }

    /// Resolved dependencies of a unit (the units that must precede it),
    /// in input-sequence order.
    pub fn dependencies_of(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut deps: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .collect();
        deps.sort();
        deps.dedup();
        deps
    }

    pub fn has_dependencies(&self, idx: NodeIndex) -> bool {
        self.graph
            .neighbors_directed(idx, Direction::Outgoing)
            .next()
            .is_some()
    }

    /// Undirected connection neighbors, deduplicated, in input-sequence
    /// order. Used only for island discovery, never for ordering.
    pub fn connections_of(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut connections: Vec<NodeIndex> = self.graph.neighbors_undirected(idx).collect();
        connections.sort();
        connections.dedup();
        connections
    }

    /// A leaf is a connected unit that nothing still depends on: every one
    /// of its connections is one of its own dependencies.
    pub fn is_leaf(&self, idx: NodeIndex) -> bool {
        let connections = self.connections_of(idx);
        !connections.is_empty() && self.dependencies_of(idx).len() == connections.len()
    }
}
