//! Foundation types for dsdiff.
//!
//! This crate provides the document model shared by the diff engine and the
//! formatters: parsed value trees, the fixed set of record components, the
//! identity signals that let the engine skip work, and the record container
//! itself.
//!
//! # Key Types
//!
//! - [`ValueTree`] -- Parsed JSON-like document
//! - [`Component`] / [`COMPONENT_SET`] -- Record components in priority order
//! - [`IdentitySignals`] -- Fingerprint and storage path of a sub-document
//! - [`Fingerprint`] -- Domain-separated BLAKE3 digest of a tree
//! - [`Record`] / [`SubDocument`] -- The composite document being compared

pub mod component;
pub mod error;
pub mod record;
pub mod signal;
pub mod value;

pub use component::{Component, COMPONENT_SET};
pub use error::TypeError;
pub use record::{Body, Record, SubDocument};
pub use signal::{Fingerprint, IdentitySignals};
pub use value::ValueTree;
