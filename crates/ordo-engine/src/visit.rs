//! Deterministic multi-pass topological visitation.
//!
//! Produces one linear sequence in which every resolved dependency appears
//! before its dependents, except where that would re-enter a unit already
//! on the current path (a cycle); the offending back-edge is skipped with a
//! diagnostic. Traversal uses an explicit stack so deep graphs cannot
//! overflow the call stack, with a three-state mark per node.

use petgraph::graph::NodeIndex;

use crate::graph::DependencyGraph;
use crate::report::{SortDiagnostic, SortReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Visiting,
    Visited,
}

struct Frame {
    node: NodeIndex,
    deps: Vec<NodeIndex>,
    next: usize,
}

/// Linearize the graph into a single topological sequence.
///
/// Three outer passes in input order keep fixed-priority chains contiguous
/// and push genuine leaves toward the end of each island's local run:
/// fixed-priority units first, then units something still depends on, then
/// whatever remains.
pub fn linearize(graph: &DependencyGraph, report: &mut SortReport) -> Vec<NodeIndex> {
    let mut marks = vec![Mark::Unvisited; graph.node_count()];
    let mut sequence = Vec::with_capacity(graph.node_count());

    for node in graph.nodes() {
        if graph.has_fixed(node) {
            visit(graph, node, &mut marks, &mut sequence, report);
        }
    }
    for node in graph.nodes() {
        if graph.has_dependencies(node) && !graph.is_leaf(node) {
            visit(graph, node, &mut marks, &mut sequence, report);
        }
    }
    for node in graph.nodes() {
        visit(graph, node, &mut marks, &mut sequence, report);
    }

    sequence
}

/// Dependencies of a node in visit order: fixed-priority dependencies
/// first, then non-leaves, then leaves, mirroring the outer pass structure.
fn ordered_dependencies(graph: &DependencyGraph, node: NodeIndex) -> Vec<NodeIndex> {
    let deps = graph.dependencies_of(node);
    let mut ordered = Vec::with_capacity(deps.len());
    ordered.extend(deps.iter().copied().filter(|&d| graph.has_fixed(d)));
    ordered.extend(
        deps.iter()
            .copied()
            .filter(|&d| !graph.has_fixed(d) && !graph.is_leaf(d)),
    );
    ordered.extend(
        deps.iter()
            .copied()
            .filter(|&d| !graph.has_fixed(d) && graph.is_leaf(d)),
    );
    ordered
}

/// Depth-first visit appending each node after all its dependencies.
///
/// A dependency marked `Visiting` is on the current path: that edge closes
/// a cycle, so it is reported and skipped to guarantee termination.
fn visit(
    graph: &DependencyGraph,
    start: NodeIndex,
    marks: &mut [Mark],
    sequence: &mut Vec<NodeIndex>,
    report: &mut SortReport,
) {
    if marks[start.index()] != Mark::Unvisited {
        return;
    }
    marks[start.index()] = Mark::Visiting;
    let mut stack = vec![Frame {
        node: start,
        deps: ordered_dependencies(graph, start),
        next: 0,
    }];

    while !stack.is_empty() {
        let top = stack.len() - 1;
        if stack[top].next >= stack[top].deps.len() {
            let node = stack[top].node;
            marks[node.index()] = Mark::Visited;
            sequence.push(node);
            stack.pop();
            continue;
        }

        let dep = stack[top].deps[stack[top].next];
        stack[top].next += 1;
        match marks[dep.index()] {
            Mark::Unvisited => {
                marks[dep.index()] = Mark::Visiting;
                stack.push(Frame {
                    node: dep,
                    deps: ordered_dependencies(graph, dep),
                    next: 0,
                });
            }
            Mark::Visiting => {
                let unit = graph.module_id(dep).to_string();
                let via = graph.module_id(stack[top].node).to_string();
                tracing::warn!("Cyclic dependency found for {unit} via {via}");
                report.push(SortDiagnostic::CycleDetected { unit, via });
            }
            Mark::Visited => {}
        }
    }
}
