//! Error types for the format crate.

use dsdiff_types::Component;

use crate::kind::FormatKind;

/// Errors that can occur while rendering a sub-diff.
///
/// A render error is scoped to that one call; the sub-diff itself stays
/// valid and can be rendered in another format.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormatError {
    /// The format needs the before tree but the sub-diff does not carry one.
    #[error("cannot render {component} as {format}: before tree unavailable")]
    MissingContext {
        component: Component,
        format: FormatKind,
    },

    /// The delta does not line up with the before tree.
    #[error("cannot render {component}: delta does not match before tree at {at}")]
    ContextMismatch { component: Component, at: String },

    /// A format name could not be parsed.
    #[error("unknown format: {0}")]
    UnknownFormat(String),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for format results.
pub type FormatResult<T> = Result<T, FormatError>;
