//! Invariant checking framework for correctness verification
//!
//! Structural invariants of the tree are checked against a live index; tests
//! and diagnostics run them after workloads to catch shape corruption early.

pub mod invariants;

pub use invariants::{
    check_all_invariants, standard_invariants, Invariant, KeyContainment, LeafCapacity,
    RangeCoverage, Violation,
};
