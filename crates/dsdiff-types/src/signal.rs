use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::ValueTree;

/// Domain tag prepended to every tree fingerprint.
const TREE_DOMAIN: &str = "dsdiff-tree-v1";

/// Cheap identity metadata attached to a sub-document.
///
/// Both signals are opaque strings supplied by whoever loaded the record.
/// Neither is ever computed from content by the diff engine itself.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentitySignals {
    /// Content digest of the sub-document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    /// Storage location of the sub-document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl IdentitySignals {
    /// No signals at all.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_fingerprint(mut self, fingerprint: impl Into<String>) -> Self {
        self.fingerprint = Some(fingerprint.into());
        self
    }

    /// The path, if it is at least `min_len` characters long.
    pub fn usable_path(&self, min_len: usize) -> Option<&str> {
        non_trivial(self.path.as_deref(), min_len)
    }

    /// The fingerprint, if it is at least `min_len` characters long.
    pub fn usable_fingerprint(&self, min_len: usize) -> Option<&str> {
        non_trivial(self.fingerprint.as_deref(), min_len)
    }
}

fn non_trivial(signal: Option<&str>, min_len: usize) -> Option<&str> {
    signal.filter(|s| s.chars().count() >= min_len)
}

/// Domain-separated BLAKE3 digest of a value tree.
///
/// Useful for callers that want to attach a fingerprint signal to a tree
/// they already hold. Object keys are sorted, so structurally equal trees
/// always produce the same fingerprint.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Digest raw bytes with the tree domain tag.
    pub fn of_bytes(data: &[u8]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(TREE_DOMAIN.as_bytes());
        hasher.update(b":");
        hasher.update(data);
        Self(*hasher.finalize().as_bytes())
    }

    /// Digest the canonical JSON encoding of a tree.
    pub fn of_tree(tree: &ValueTree) -> Self {
        // Serializing a `Value` cannot fail: every key is already a string.
        let data = serde_json::to_vec(tree).unwrap_or_default();
        Self::of_bytes(&data)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hex-encoded digest.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// First 8 hex characters.
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self.short_hex())
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
