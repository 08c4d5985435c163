//! Constraint-driven execution-order sorting engine: dependency graph
//! construction, deterministic multi-pass topological visitation, island
//! partitioning, minimal-perturbation priority assignment, and cycle
//! detection with diagnostics.

pub mod assign;
pub mod cache;
pub mod detect;
pub mod graph;
pub mod island;
pub mod report;
pub mod sorter;
pub mod visit;
