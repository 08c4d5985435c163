//! Collaborator seams for the sorting engine: unit enumeration and the
//! live priority store.
//!
//! The engine consumes and produces plain in-memory data; discovering the
//! unit set and persisting priorities are the embedder's job. `MemoryStore`
//! is a self-contained implementation for tests and simple embedders.

use crate::errors::OrdoError;
use crate::unit::Unit;

/// Supplies the current full set of units.
///
/// Must return a consistent snapshot for the duration of one sort.
pub trait UnitProvider {
    fn units(&self) -> Vec<Unit>;
}

/// The live, externally visible priority of each unit.
///
/// The assigner's output is applied through this interface. Failures are
/// reported per-unit and never abort a whole pass.
pub trait PriorityStore {
    fn get(&self, module_id: &str) -> Result<i32, OrdoError>;
    fn set(&mut self, module_id: &str, priority: i32) -> Result<(), OrdoError>;
}

/// In-memory unit registry implementing both collaborator traits.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    units: Vec<Unit>,
}

impl MemoryStore {
    pub fn new(units: Vec<Unit>) -> Self {
        Self { units }
    }

    pub fn unit(&self, module_id: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.module_id == module_id)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl UnitProvider for MemoryStore {
    fn units(&self) -> Vec<Unit> {
        self.units.clone()
    }
}

impl PriorityStore for MemoryStore {
    fn get(&self, module_id: &str) -> Result<i32, OrdoError> {
        self.unit(module_id)
            .map(|u| u.priority)
            .ok_or_else(|| OrdoError::UnknownUnit {
                module_id: module_id.to_string(),
            })
    }

    fn set(&mut self, module_id: &str, priority: i32) -> Result<(), OrdoError> {
        let unit = self
            .units
            .iter_mut()
            .find(|u| u.module_id == module_id)
            .ok_or_else(|| OrdoError::UnknownUnit {
                module_id: module_id.to_string(),
            })?;
        unit.priority = priority;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_and_set_roundtrip() {
        let mut store = MemoryStore::new(vec![Unit::new("a").with_priority(5)]);
        assert_eq!(store.get("a").unwrap(), 5);
        store.set("a", -2).unwrap();
        assert_eq!(store.get("a").unwrap(), -2);
    }

    #[test]
    fn unknown_unit_is_an_error() {
        let mut store = MemoryStore::new(vec![]);
        assert!(store.get("missing").is_err());
        assert!(store.set("missing", 1).is_err());
    }

    #[test]
    fn provider_returns_snapshot() {
        let store = MemoryStore::new(vec![Unit::new("a"), Unit::new("b")]);
        let units = store.units();
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].module_id, "a");
    }
}
