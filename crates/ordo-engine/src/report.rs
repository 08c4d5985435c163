//! Structured diagnostics collected during a sort.
//!
//! Nothing in the engine aborts on a defect in the declared constraints;
//! every problem degrades to the best assignment available plus one of
//! these diagnostics.

use std::fmt;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
}

/// A single structured diagnostic raised during a sort or apply pass.
#[derive(Debug, Clone)]
pub enum SortDiagnostic {
    /// A constraint named a target unit absent from the current set; the
    /// edge was dropped.
    UnresolvedTarget { unit: String, target: String },
    /// A constraint chain formed a loop; the back-edge into `unit` was
    /// skipped when reached via `via`.
    CycleDetected { unit: String, via: String },
    /// Ordering pressure forced a unit away from its declared fixed
    /// priority; the assigned value wins.
    FixedOverridden {
        unit: String,
        requested: i32,
        assigned: i32,
    },
    /// The priority store rejected a computed value for one unit.
    ApplyFailed { unit: String, message: String },
    /// Per-island summary: starting cursor and members in walk order.
    IslandSummary {
        island: usize,
        start: i32,
        members: Vec<IslandUnitSummary>,
    },
}

/// One island member as reported in an `IslandSummary`.
#[derive(Debug, Clone)]
pub struct IslandUnitSummary {
    pub module_id: String,
    pub fixed_priority: Option<i32>,
    pub is_leaf: bool,
}

impl SortDiagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            SortDiagnostic::IslandSummary { .. } => Severity::Info,
            _ => Severity::Warning,
        }
    }
}

impl fmt::Display for SortDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDiagnostic::UnresolvedTarget { unit, target } => {
                write!(f, "constraint target {target} not found for {unit}")
            }
            SortDiagnostic::CycleDetected { unit, via } => {
                write!(f, "cyclic dependency found for {unit} via {via}")
            }
            SortDiagnostic::FixedOverridden {
                unit,
                requested,
                assigned,
            } => write!(
                f,
                "{unit} has fixed priority {requested} but was assigned {assigned}"
            ),
            SortDiagnostic::ApplyFailed { unit, message } => {
                write!(f, "failed to apply priority for {unit}: {message}")
            }
            SortDiagnostic::IslandSummary {
                island,
                start,
                members,
            } => {
                write!(f, "island {island} starts at {start}: ")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{member}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for IslandUnitSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.module_id)?;
        if let Some(fixed) = self.fixed_priority {
            write!(f, "[fixed={fixed}]")?;
        }
        if self.is_leaf {
            write!(f, "(leaf)")?;
        }
        Ok(())
    }
}

/// All diagnostics raised during one sort/apply pass.
#[derive(Debug, Default)]
pub struct SortReport {
    pub diagnostics: Vec<SortDiagnostic>,
}

impl SortReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: SortDiagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Warning-severity diagnostics only.
    pub fn warnings(&self) -> impl Iterator<Item = &SortDiagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity() == Severity::Warning)
    }

    /// True when no warnings were raised (info summaries are fine).
    pub fn is_clean(&self) -> bool {
        self.warnings().next().is_none()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl fmt::Display for SortReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.diagnostics.is_empty() {
            return write!(f, "No sort diagnostics.");
        }
        writeln!(f, "Sort diagnostics ({}):", self.diagnostics.len())?;
        for diagnostic in &self.diagnostics {
            writeln!(f, "  {diagnostic}")?;
        }
        Ok(())
    }
}
