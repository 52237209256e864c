//! The parsed document model.

/// A parsed JSON-like document: object, array, or scalar.
///
/// Objects are backed by a sorted map, so key order never affects
/// equality, hashing, or rendering.
pub type ValueTree = serde_json::Value;
