//! Island partitioning.
//!
//! Splits the visitor's sequence into maximal connected components of the
//! undirected connection graph. Each island is assigned priorities
//! independently; an island's internal order is its relative order in the
//! input sequence.

use std::collections::HashSet;

use petgraph::graph::NodeIndex;

use crate::graph::DependencyGraph;

/// One unit within an island, with its leaf classification.
#[derive(Debug, Clone, Copy)]
pub struct IslandMember {
    pub node: NodeIndex,
    pub is_leaf: bool,
}

/// Partition the sequence into islands by flood-filling connections.
///
/// Islands are emitted in order of their first member's position in the
/// sequence, are disjoint, and together cover the whole sequence.
pub fn partition(graph: &DependencyGraph, sequence: &[NodeIndex]) -> Vec<Vec<IslandMember>> {
    let mut claimed: HashSet<NodeIndex> = HashSet::new();
    let mut islands = Vec::new();

    for &seed in sequence {
        if claimed.contains(&seed) {
            continue;
        }

        // open-set/closed-set reachability over the connection graph
        let mut component: HashSet<NodeIndex> = HashSet::new();
        let mut open = vec![seed];
        while let Some(current) = open.pop() {
            if !component.insert(current) {
                continue;
            }
            for connection in graph.connections_of(current) {
                if !component.contains(&connection) {
                    open.push(connection);
                }
            }
        }

        let mut members = Vec::with_capacity(component.len());
        for &node in sequence {
            if component.contains(&node) {
                claimed.insert(node);
                members.push(IslandMember {
                    node,
                    is_leaf: graph.is_leaf(node),
                });
            }
        }
        islands.push(members);
    }

    islands
}
