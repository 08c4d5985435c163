use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::OrdoError;
use crate::unit::Unit;

/// Serialized table of non-zero unit priorities.
///
/// Zero is the ambient default, so units at priority 0 are omitted and
/// `get` reports 0 for anything unrecorded. The engine never reads or
/// writes this; it exists so embedders can persist the result of a sort
/// and look priorities up cheaply at run time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrioritySnapshot {
    #[serde(default)]
    pub unit: Vec<SnapshotEntry>,
}

/// A single recorded unit priority.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub module_id: String,
    pub priority: i32,
}

impl PrioritySnapshot {
    /// Record the priority of every unit that is not at the default of 0.
    ///
    /// Entries are sorted by module id so the serialized form is stable.
    pub fn capture(units: &[Unit]) -> Self {
        let mut entries: Vec<SnapshotEntry> = units
            .iter()
            .filter(|u| u.priority != 0)
            .map(|u| SnapshotEntry {
                module_id: u.module_id.clone(),
                priority: u.priority,
            })
            .collect();
        entries.sort_by(|a, b| a.module_id.cmp(&b.module_id));
        Self { unit: entries }
    }

    /// The recorded priority for a unit, or 0 if none was recorded.
    pub fn get(&self, module_id: &str) -> i32 {
        self.unit
            .iter()
            .find(|e| e.module_id == module_id)
            .map(|e| e.priority)
            .unwrap_or(0)
    }

    /// Load and parse a snapshot file from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| OrdoError::Snapshot {
            message: format!("Failed to read snapshot: {e}"),
        })?;
        let snapshot: Self = toml::from_str(&content).map_err(|e| OrdoError::Snapshot {
            message: format!("Failed to parse snapshot: {e}"),
        })?;
        tracing::debug!(
            "Loaded priority snapshot with {} entries from {}",
            snapshot.unit.len(),
            path.display()
        );
        Ok(snapshot)
    }

    /// Serialize the snapshot to a pretty-printed TOML string.
    pub fn to_string_pretty(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn len(&self) -> usize {
        self.unit.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unit.is_empty()
    }
}
