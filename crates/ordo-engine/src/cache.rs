//! Session cache for fixed-priority lookups.
//!
//! Resolving a unit's fixed priority is cheap here, but embedders that
//! source units from reflection-like discovery pay for every lookup. The
//! cache memoizes the answer per module id across sort invocations and has
//! no correctness dependency: callers must call `invalidate` whenever the
//! unit set or any unit's declared attributes change, and clearing it early
//! is always safe.

use std::collections::HashMap;

use ordo_core::unit::Unit;

/// Memoization table for "does this unit carry a fixed priority".
#[derive(Debug, Default)]
pub struct FixedOrderCache {
    entries: HashMap<String, Option<i32>>,
}

impl FixedOrderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The unit's fixed priority, memoized by module id.
    ///
    /// The first lookup for a module id records the unit's declared value;
    /// later lookups return the recorded value even if the unit changed.
    pub fn fixed_order(&mut self, unit: &Unit) -> Option<i32> {
        *self
            .entries
            .entry(unit.module_id.clone())
            .or_insert(unit.fixed_priority)
    }

    /// Drop every memoized entry.
    pub fn invalidate(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
