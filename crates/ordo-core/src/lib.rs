//! Core data types for the ordo execution-order sorter.
//!
//! This crate defines the types shared between the sorting engine and its
//! embedders: units and their ordering constraints, the collaborator traits
//! for enumerating units and reading/writing live priorities, the unified
//! error type, and the serialized priority snapshot.
//!
//! This crate is intentionally free of graph logic and I/O beyond the
//! snapshot helpers.

pub mod errors;
pub mod snapshot;
pub mod store;
pub mod unit;
