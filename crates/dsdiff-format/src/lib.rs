//! Text rendering for dsdiff.
//!
//! Turns the sub-diffs produced by `dsdiff-diff` into human-facing text:
//! one-line counts, key listings, plus/minus views of the before document,
//! and jsondiffpatch-style delta JSON.
//!
//! # Quick Start
//!
//! ```rust
//! use dsdiff_diff::SubDiff;
//! use dsdiff_format::{render, FormatKind};
//! use dsdiff_types::Component;
//! use serde_json::json;
//!
//! let sub = SubDiff::compare(Component::Meta, json!({"title": "a"}), json!({"title": "b"}));
//! assert_eq!(
//!     render(&sub, FormatKind::ListKeys).unwrap(),
//!     "Meta: 1 change\n\t- modified title"
//! );
//! ```

pub mod config;
mod delta_tree;
pub mod error;
pub mod formatter;
pub mod kind;
pub mod summary;
pub mod text_patch;
mod unified;

pub use config::FormatConfig;
pub use error::{FormatError, FormatResult};
pub use formatter::{render, Formatter};
pub use kind::FormatKind;
pub use summary::{select_summary, summarize_all};
pub use text_patch::text_patch;
pub use unified::{ADDED_COLOR, REMOVED_COLOR, RESET};
