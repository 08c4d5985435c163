use serde::{Deserialize, Serialize};

/// The kind of a declared ordering relation between two units.
///
/// `After` means the declaring unit must end up with a strictly greater
/// priority than the target; `Before` means strictly smaller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstraintKind {
    After,
    Before,
}

/// A directed ordering relation declared by a unit against another unit.
///
/// The target is named by module identifier. Constraints whose target is
/// absent from the current unit set are ignored by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    pub relative_to: String,
    pub kind: ConstraintKind,
}

impl Constraint {
    pub fn after(relative_to: impl Into<String>) -> Self {
        Self {
            relative_to: relative_to.into(),
            kind: ConstraintKind::After,
        }
    }

    pub fn before(relative_to: impl Into<String>) -> Self {
        Self {
            relative_to: relative_to.into(),
            kind: ConstraintKind::Before,
        }
    }
}

/// One sortable item: a stable module identifier, the live priority at
/// enumeration time, an optional author-declared fixed priority, and the
/// declared ordering constraints.
///
/// This is a value view for the duration of one sort pass; the engine does
/// not own units long-term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub module_id: String,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub fixed_priority: Option<i32>,
    #[serde(default)]
    pub constraints: Vec<Constraint>,
}

impl Unit {
    pub fn new(module_id: impl Into<String>) -> Self {
        Self {
            module_id: module_id.into(),
            priority: 0,
            fixed_priority: None,
            constraints: Vec::new(),
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_fixed(mut self, fixed: i32) -> Self {
        self.fixed_priority = Some(fixed);
        self
    }

    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn has_constraints(&self) -> bool {
        !self.constraints.is_empty()
    }
}
