//! Pipeline orchestration: change detection, the full sort, and applying
//! computed priorities to the store.

use std::collections::HashMap;
use std::time::Instant;

use ordo_core::store::{PriorityStore, UnitProvider};
use ordo_core::unit::Unit;

use crate::cache::FixedOrderCache;
use crate::graph::DependencyGraph;
use crate::report::{SortDiagnostic, SortReport};
use crate::{assign, detect, island, visit};

/// The output of one full sort: the computed priority for every unit the
/// assigner touched, plus every diagnostic raised along the way.
#[derive(Debug)]
pub struct SortOutcome {
    pub priorities: HashMap<String, i32>,
    pub report: SortReport,
}

/// The output of [`process`]: whether a sort ran and how many units the
/// store actually changed.
#[derive(Debug)]
pub struct ProcessOutcome {
    pub sorted: bool,
    pub changed: usize,
    pub report: SortReport,
}

/// Run the full pipeline on a unit snapshot.
///
/// Always terminates with a total assignment, even for contradictory
/// constraint sets; defects surface as diagnostics in the report.
pub fn sort_units(units: Vec<Unit>, cache: &mut FixedOrderCache) -> SortOutcome {
    let started = Instant::now();
    tracing::debug!("Starting sort of {} units", units.len());

    let mut report = SortReport::new();
    let graph = DependencyGraph::build(units, cache, &mut report);
    let sequence = visit::linearize(&graph, &mut report);
    let islands = island::partition(&graph, &sequence);
    let priorities = assign::assign(&graph, &islands, &mut report);

    tracing::debug!(
        "Sort complete: {} islands, {} assignments, took {:.2?}",
        islands.len(),
        priorities.len(),
        started.elapsed()
    );
    SortOutcome { priorities, report }
}

/// Write every computed priority that differs from the store's current
/// value, in module-id order.
///
/// Per-unit store failures become `ApplyFailed` warnings and never roll
/// back or abort the rest of the pass. Returns how many units changed.
pub fn apply<S: PriorityStore>(
    priorities: &HashMap<String, i32>,
    store: &mut S,
    report: &mut SortReport,
) -> usize {
    let mut module_ids: Vec<&String> = priorities.keys().collect();
    module_ids.sort();

    let mut changed = 0;
    for module_id in module_ids {
        let priority = priorities[module_id];
        let current = match store.get(module_id) {
            Ok(current) => current,
            Err(e) => {
                tracing::warn!("Failed to read priority for {module_id}: {e}");
                report.push(SortDiagnostic::ApplyFailed {
                    unit: module_id.clone(),
                    message: e.to_string(),
                });
                continue;
            }
        };
        if current == priority {
            continue;
        }
        match store.set(module_id, priority) {
            Ok(()) => {
                changed += 1;
                tracing::info!(
                    "Order changed. Unit:{module_id} PrevOrder:{current} NewOrder:{priority}"
                );
            }
            Err(e) => {
                tracing::warn!("Failed to apply priority for {module_id}: {e}");
                report.push(SortDiagnostic::ApplyFailed {
                    unit: module_id.clone(),
                    message: e.to_string(),
                });
            }
        }
    }
    changed
}

/// Full entry point: enumerate units, skip the pipeline when the detector
/// finds nothing to do, otherwise sort and apply.
pub fn process<P: UnitProvider, S: PriorityStore>(
    provider: &P,
    store: &mut S,
    cache: &mut FixedOrderCache,
) -> ProcessOutcome {
    let units = provider.units();
    if !detect::needs_sort(&units) {
        tracing::debug!("Doesn't need to sort");
        return ProcessOutcome {
            sorted: false,
            changed: 0,
            report: SortReport::new(),
        };
    }

    let SortOutcome {
        priorities,
        mut report,
    } = sort_units(units, cache);
    let changed = apply(&priorities, store, &mut report);
    if changed > 0 {
        tracing::info!("{changed} unit priorities changed");
    }
    ProcessOutcome {
        sorted: true,
        changed,
        report,
    }
}
