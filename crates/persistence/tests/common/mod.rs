//! Test infrastructure for the persistence layer.
//!
//! Shared fixtures, a backend harness running on the in-memory index client,
//! and assertion helpers for saved records.

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;
pub mod harness;

// Re-export commonly used items
pub use assertions::*;
pub use fixtures::*;
pub use harness::*;
