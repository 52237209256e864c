//! Diff engine for dsdiff.
//!
//! Compares two records component by component and produces path-addressed
//! deltas. Identity signals (storage paths, fingerprints) let unchanged
//! components skip the full tree comparison.
//!
//! # Key Types
//!
//! - [`Delta`] / [`DeltaNode`] -- Path-addressed change tree
//! - [`diff`] -- Index-aligned value-tree diff
//! - [`FastPathGate`] / [`Shortcut`] -- Identity-signal pre-check
//! - [`RecordDiffer`] / [`DiffMap`] / [`SubDiff`] -- Per-component orchestration

pub mod config;
pub mod delta;
pub mod error;
pub mod gate;
pub mod orchestrator;
pub mod tree_diff;

pub use config::DiffConfig;
pub use delta::{Change, Delta, DeltaNode, DeltaPath, PathSegment, ROOT_LABEL};
pub use error::{DiffError, DiffResult, Side};
pub use gate::{try_short_circuit, FastPathGate, GatePolicy, Shortcut, Signal};
pub use orchestrator::{diff_components, DiffMap, PayloadPair, RecordDiffer, SubDiff};
pub use tree_diff::diff;
