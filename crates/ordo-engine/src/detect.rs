//! Cheap pre-check for whether a full sort could change anything.
//!
//! Compares live priorities against fixed values and declared constraints.
//! Reporting "needed" when nothing would change is acceptable; reporting
//! "not needed" when a constraint is violated is not.

use std::collections::{HashMap, HashSet};

use ordo_core::unit::{ConstraintKind, Unit};

/// True if some fixed priority is not honored or some constraint with a
/// present target is not already strictly satisfied.
pub fn needs_sort(units: &[Unit]) -> bool {
    let live: HashMap<&str, i32> = units
        .iter()
        .map(|u| (u.module_id.as_str(), u.priority))
        .collect();

    for unit in units {
        if let Some(fixed) = unit.fixed_priority {
            if unit.priority != fixed {
                return true;
            }
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for constraint in &unit.constraints {
            if !seen.insert(constraint.relative_to.as_str()) {
                continue;
            }
            if constraint.relative_to == unit.module_id {
                continue;
            }
            let Some(&other) = live.get(constraint.relative_to.as_str()) else {
                continue;
            };
            match constraint.kind {
                ConstraintKind::After => {
                    if unit.priority <= other {
                        return true;
                    }
                }
                ConstraintKind::Before => {
                    if unit.priority >= other {
                        return true;
                    }
                }
            }
        }
    }

    false
}
