use std::collections::HashMap;

use ordo_core::unit::{Constraint, Unit};
use ordo_engine::cache::FixedOrderCache;
use ordo_engine::report::SortDiagnostic;
use ordo_engine::sorter::{sort_units, SortOutcome};

fn sort(units: Vec<Unit>) -> SortOutcome {
    sort_units(units, &mut FixedOrderCache::new())
}

#[test]
fn chain_compacts_below_zero_with_leaf_at_zero() {
    let outcome = sort(vec![
        Unit::new("a"),
        Unit::new("b").with_constraint(Constraint::after("a")),
        Unit::new("c").with_constraint(Constraint::after("b")),
    ]);
    assert_eq!(outcome.priorities["a"], -3);
    assert_eq!(outcome.priorities["b"], -2);
    assert_eq!(outcome.priorities["c"], 0);
    assert!(outcome.report.is_clean());
}

#[test]
fn before_and_after_declarations_are_equivalent() {
    let with_before = sort(vec![
        Unit::new("a").with_constraint(Constraint::before("b")),
        Unit::new("b"),
    ]);
    let with_after = sort(vec![
        Unit::new("a"),
        Unit::new("b").with_constraint(Constraint::after("a")),
    ]);
    assert_eq!(with_before.priorities, with_after.priorities);
    assert!(with_before.priorities["b"] > with_before.priorities["a"]);
}

#[test]
fn every_unit_lands_strictly_after_its_dependencies() {
    let units = vec![
        Unit::new("input"),
        Unit::new("physics").with_constraint(Constraint::after("input")),
        Unit::new("ai").with_constraint(Constraint::after("input")),
        Unit::new("animation")
            .with_constraint(Constraint::after("physics"))
            .with_constraint(Constraint::after("ai")),
        Unit::new("bootstrap").with_constraint(Constraint::before("input")),
    ];
    let outcome = sort(units.clone());
    let p = &outcome.priorities;

    for unit in &units {
        for constraint in &unit.constraints {
            let own = p[&unit.module_id];
            let other = p[&constraint.relative_to];
            match constraint.kind {
                ordo_core::unit::ConstraintKind::After => {
                    assert!(own > other, "{} must run after {}", unit.module_id, constraint.relative_to)
                }
                ordo_core::unit::ConstraintKind::Before => {
                    assert!(own < other, "{} must run before {}", unit.module_id, constraint.relative_to)
                }
            }
        }
    }
    assert!(outcome.report.is_clean());
}

#[test]
fn fixed_isolated_unit_keeps_exact_value() {
    let outcome = sort(vec![Unit::new("d").with_fixed(100)]);
    assert_eq!(outcome.priorities["d"], 100);
    assert!(outcome.report.is_clean());
}

#[test]
fn fixed_unit_without_dependencies_is_never_shifted() {
    let outcome = sort(vec![
        Unit::new("anchored").with_fixed(-250),
        Unit::new("a"),
        Unit::new("b").with_constraint(Constraint::after("a")),
    ]);
    assert_eq!(outcome.priorities["anchored"], -250);
}

#[test]
fn unconstrained_unit_is_left_untouched() {
    let outcome = sort(vec![
        Unit::new("alone").with_priority(42),
        Unit::new("a"),
        Unit::new("b").with_constraint(Constraint::after("a")),
    ]);
    assert!(!outcome.priorities.contains_key("alone"));
    assert!(outcome.priorities.contains_key("a"));
}

#[test]
fn sorting_twice_yields_identical_priorities() {
    let units = vec![
        Unit::new("input"),
        Unit::new("physics").with_constraint(Constraint::after("input")),
        Unit::new("render").with_constraint(Constraint::after("physics")),
        Unit::new("audio").with_fixed(10),
        Unit::new("mixer").with_constraint(Constraint::after("audio")),
        Unit::new("standalone"),
    ];
    let first = sort(units.clone());
    let second = sort(units);
    assert_eq!(first.priorities, second.priorities);
}

#[test]
fn cycle_terminates_with_diagnostic_and_finite_priorities() {
    let outcome = sort(vec![
        Unit::new("a").with_constraint(Constraint::after("b")),
        Unit::new("b").with_constraint(Constraint::after("a")),
    ]);
    assert!(outcome.priorities.contains_key("a"));
    assert!(outcome.priorities.contains_key("b"));

    let cycle_units: Vec<&str> = outcome
        .report
        .warnings()
        .filter_map(|d| match d {
            SortDiagnostic::CycleDetected { unit, .. } => Some(unit.as_str()),
            _ => None,
        })
        .collect();
    assert!(!cycle_units.is_empty());
    assert!(cycle_units.iter().all(|u| *u == "a" || *u == "b"));
}

#[test]
fn cycle_does_not_poison_the_rest_of_the_graph() {
    let outcome = sort(vec![
        Unit::new("a").with_constraint(Constraint::after("b")),
        Unit::new("b").with_constraint(Constraint::after("a")),
        Unit::new("x"),
        Unit::new("y").with_constraint(Constraint::after("x")),
    ]);
    assert!(outcome.priorities["y"] > outcome.priorities["x"]);
}

#[test]
fn dangling_target_is_ignored_with_warning() {
    let outcome = sort(vec![
        Unit::new("a").with_constraint(Constraint::after("missing"))
    ]);
    // the edge is dropped, leaving a fully independent unit
    assert!(outcome.priorities.is_empty());
    assert!(outcome
        .report
        .warnings()
        .any(|d| matches!(d, SortDiagnostic::UnresolvedTarget { .. })));
}

#[test]
fn duplicate_constraints_keep_first_occurrence() {
    let outcome = sort(vec![
        Unit::new("t"),
        Unit::new("u")
            .with_constraint(Constraint::after("t"))
            .with_constraint(Constraint::before("t")),
    ]);
    assert!(outcome.priorities["u"] > outcome.priorities["t"]);
}

#[test]
fn separate_islands_are_assigned_independently() {
    let one_island = sort(vec![
        Unit::new("a"),
        Unit::new("b").with_constraint(Constraint::after("a")),
    ]);
    let two_islands = sort(vec![
        Unit::new("a"),
        Unit::new("b").with_constraint(Constraint::after("a")),
        Unit::new("x"),
        Unit::new("y").with_constraint(Constraint::after("x")),
    ]);
    // adding an unrelated island never disturbs the first island's values
    let keep: HashMap<&str, i32> = two_islands
        .priorities
        .iter()
        .filter(|(k, _)| k.as_str() == "a" || k.as_str() == "b")
        .map(|(k, v)| (k.as_str(), *v))
        .collect();
    assert_eq!(keep["a"], one_island.priorities["a"]);
    assert_eq!(keep["b"], one_island.priorities["b"]);
}
