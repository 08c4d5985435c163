//! Per-island minimal-perturbation priority assignment.
//!
//! Walks each island in sequence order with a running cursor: fixed
//! priorities win ties (with a warning when ordering pressure shifts them),
//! the last leaf is pulled toward 0, everything else stays in a compact
//! negative range, and the cursor only advances when a dependent genuinely
//! needs to run strictly after a non-leaf predecessor.

use std::collections::HashMap;

use crate::graph::DependencyGraph;
use crate::island::IslandMember;
use crate::report::{IslandUnitSummary, SortDiagnostic, SortReport};

/// Compute the final priority for every unit the sort may touch.
///
/// Size-1 islands without a fixed priority get no entry at all: fully
/// independent units keep whatever priority they already had.
pub fn assign(
    graph: &DependencyGraph,
    islands: &[Vec<IslandMember>],
    report: &mut SortReport,
) -> HashMap<String, i32> {
    let mut priorities = HashMap::new();

    // The readability clamp below only kicks in once every declared fixed
    // priority, across all islands, has been consumed.
    let mut fixed_remaining = islands
        .iter()
        .flatten()
        .filter(|m| graph.has_fixed(m.node))
        .count();

    for (island_no, island) in islands.iter().enumerate() {
        let len = island.len() as i32;
        let has_fixed = island.iter().any(|m| graph.has_fixed(m.node));

        // Don't touch fully independent units; externally set values for
        // them stay as they are.
        if island.len() == 1 && !has_fixed {
            continue;
        }

        // Starting cursor: compact range below zero, lowered far enough
        // that every fixed member can still be reached exactly after its
        // predecessors.
        let mut cursor = -len;
        for (j, member) in island.iter().enumerate() {
            if let Some(fixed) = graph.fixed_priority(member.node) {
                cursor = cursor.min(fixed - j as i32);
            }
        }

        report.push(SortDiagnostic::IslandSummary {
            island: island_no,
            start: cursor,
            members: island
                .iter()
                .map(|m| IslandUnitSummary {
                    module_id: graph.module_id(m.node).to_string(),
                    fixed_priority: graph.fixed_priority(m.node),
                    is_leaf: m.is_leaf,
                })
                .collect(),
        });
        tracing::debug!(
            "Island {island_no} starts at {cursor} with {} units",
            island.len()
        );

        for (j, member) in island.iter().enumerate() {
            if let Some(fixed) = graph.fixed_priority(member.node) {
                cursor = cursor.max(fixed);
                if cursor != fixed {
                    tracing::warn!(
                        "{} has fixed priority {fixed} but dependency sorting moved it to {cursor}",
                        graph.module_id(member.node)
                    );
                    report.push(SortDiagnostic::FixedOverridden {
                        unit: graph.module_id(member.node).to_string(),
                        requested: fixed,
                        assigned: cursor,
                    });
                }
                fixed_remaining -= 1;
            } else if fixed_remaining == 0 {
                // Pull the final leaf to 0 and keep the rest within
                // [-len, 0] so the assigned range stays readable.
                let trailing_leaf = island[j + 1..].iter().any(|m| m.is_leaf);
                cursor = if member.is_leaf && !trailing_leaf {
                    cursor.max(0)
                } else {
                    cursor.max(-len)
                };
            }

            priorities.insert(graph.module_id(member.node).to_string(), cursor);

            // A gap is only needed when the next unit must run strictly
            // after a non-leaf predecessor; leaves and fixed-priority units
            // may share their predecessor's value.
            if let Some(next) = island.get(j + 1) {
                if graph.has_dependencies(next.node)
                    && !member.is_leaf
                    && !graph.has_fixed(next.node)
                {
                    cursor += 1;
                }
            }
        }
    }

    priorities
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::FixedOrderCache;
    use crate::{island, visit};
    use ordo_core::unit::{Constraint, Unit};

    fn assigned(units: Vec<Unit>) -> (HashMap<String, i32>, SortReport) {
        let mut cache = FixedOrderCache::new();
        let mut report = SortReport::new();
        let graph = DependencyGraph::build(units, &mut cache, &mut report);
        let sequence = visit::linearize(&graph, &mut report);
        let islands = island::partition(&graph, &sequence);
        let priorities = assign(&graph, &islands, &mut report);
        (priorities, report)
    }

    #[test]
    fn chain_lands_leaf_on_zero() {
        let (priorities, report) = assigned(vec![
            Unit::new("a"),
            Unit::new("b").with_constraint(Constraint::after("a")),
            Unit::new("c").with_constraint(Constraint::after("b")),
        ]);
        assert_eq!(priorities["a"], -3);
        assert_eq!(priorities["b"], -2);
        assert_eq!(priorities["c"], 0);
        assert!(report.is_clean());
    }

    #[test]
    fn independent_unit_gets_no_assignment() {
        let (priorities, _) = assigned(vec![Unit::new("alone").with_priority(42)]);
        assert!(priorities.is_empty());
    }

    #[test]
    fn fixed_singleton_keeps_exact_value() {
        let (priorities, report) = assigned(vec![Unit::new("d").with_fixed(100)]);
        assert_eq!(priorities["d"], 100);
        assert!(report.is_clean());
    }

    #[test]
    fn negative_fixed_value_gets_headroom_for_predecessors() {
        let (priorities, report) = assigned(vec![
            Unit::new("a"),
            Unit::new("b").with_constraint(Constraint::after("a")),
            Unit::new("sink")
                .with_fixed(-10)
                .with_constraint(Constraint::after("b")),
        ]);
        assert_eq!(priorities["sink"], -10);
        assert!(priorities["a"] < priorities["b"]);
        assert!(priorities["b"] < -10);
        assert!(report.is_clean());
    }

    #[test]
    fn conflicting_fixed_values_warn_and_shift() {
        let (priorities, report) = assigned(vec![
            Unit::new("a").with_fixed(5),
            Unit::new("b")
                .with_fixed(3)
                .with_constraint(Constraint::after("a")),
        ]);
        assert_eq!(priorities["a"], 5);
        assert_eq!(priorities["b"], 5);
        assert!(report.warnings().any(|d| matches!(
            d,
            SortDiagnostic::FixedOverridden {
                requested: 3,
                assigned: 5,
                ..
            }
        )));
    }

    #[test]
    fn island_summaries_are_emitted() {
        let (_, report) = assigned(vec![
            Unit::new("a"),
            Unit::new("b").with_constraint(Constraint::after("a")),
        ]);
        assert!(report
            .diagnostics
            .iter()
            .any(|d| matches!(d, SortDiagnostic::IslandSummary { .. })));
    }
}
