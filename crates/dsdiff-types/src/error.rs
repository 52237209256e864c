use thiserror::Error;

/// Errors produced while building the record model.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unknown component: {0}")]
    UnknownComponent(String),

    #[error("expected a JSON object for {0}")]
    NotAnObject(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}
