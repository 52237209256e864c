//! Error types for the diff crate.

use std::fmt;

use dsdiff_types::Component;

/// Which of the two compared records a failure came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    A,
    B,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => f.write_str("a"),
            Self::B => f.write_str("b"),
        }
    }
}

/// Errors that can occur during diff operations.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// A sub-document could not be turned into a value tree.
    #[error("error serializing {component} {side}: {message}")]
    Serialization {
        component: Component,
        side: Side,
        message: String,
    },
}

impl DiffError {
    pub fn serialization(component: Component, side: Side, err: impl fmt::Display) -> Self {
        Self::Serialization {
            component,
            side,
            message: err.to_string(),
        }
    }
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_component_and_side() {
        let err = DiffError::serialization(Component::Structure, Side::B, "expected value");
        assert_eq!(
            err.to_string(),
            "error serializing structure b: expected value"
        );
    }
}
