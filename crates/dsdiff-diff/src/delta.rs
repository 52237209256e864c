//! The delta tree produced by comparing two value trees.
//!
//! A [`Delta`] mirrors the shape of the compared documents but keeps only
//! the parts that changed. Leaves are additions, removals, and
//! modifications; containers hold the changed children of an object or an
//! array, keyed by name or index.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use dsdiff_types::ValueTree;

/// Label used for the root when the whole document was replaced.
pub const ROOT_LABEL: &str = "<root>";

/// A single node in a delta tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeltaNode {
    /// Nothing changed at or below this node.
    Unchanged,
    /// The value exists only in the new tree.
    Added(ValueTree),
    /// The value exists only in the old tree.
    Removed(ValueTree),
    /// A scalar changed, or the node changed type.
    Modified { old: ValueTree, new: ValueTree },
    /// Changed array elements, keyed by index.
    Array(BTreeMap<usize, DeltaNode>),
    /// Changed object members, keyed by name.
    Object(BTreeMap<String, DeltaNode>),
}

impl DeltaNode {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    /// Number of leaf changes at or below this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Unchanged => 0,
            Self::Added(_) | Self::Removed(_) | Self::Modified { .. } => 1,
            Self::Array(children) => children.values().map(Self::leaf_count).sum(),
            Self::Object(children) => children.values().map(Self::leaf_count).sum(),
        }
    }
}

/// One step in a path from the root of a document.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(&key.replace('~', "~0").replace('/', "~1")),
            Self::Index(i) => write!(f, "{i}"),
        }
    }
}

/// A path from the document root, displayed as a JSON pointer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeltaPath(pub Vec<PathSegment>);

impl DeltaPath {
    pub fn root() -> Self {
        Self::default()
    }

    fn child(&self, segment: PathSegment) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        Self(segments)
    }
}

impl fmt::Display for DeltaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.0 {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

/// A leaf change together with its location.
#[derive(Clone, Debug, PartialEq)]
pub struct Change<'a> {
    pub path: DeltaPath,
    pub node: &'a DeltaNode,
}

/// The result of diffing two value trees.
///
/// An empty delta means "no change" and is indistinguishable from a diff
/// that was never run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Delta {
    root: DeltaNode,
}

impl Default for Delta {
    fn default() -> Self {
        Self::empty()
    }
}

impl Delta {
    pub fn new(root: DeltaNode) -> Self {
        Self { root }
    }

    /// The "no change" delta.
    pub fn empty() -> Self {
        Self::new(DeltaNode::Unchanged)
    }

    pub fn root(&self) -> &DeltaNode {
        &self.root
    }

    /// Returns `true` if nothing changed.
    pub fn is_empty(&self) -> bool {
        self.root.leaf_count() == 0
    }

    /// Number of leaf changes (additions, removals, modifications).
    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Names of the changed top-level entries.
    ///
    /// Object deltas yield member names and array deltas yield indices. A
    /// replaced root yields [`ROOT_LABEL`].
    pub fn top_level_keys(&self) -> Vec<String> {
        match &self.root {
            DeltaNode::Unchanged => Vec::new(),
            DeltaNode::Object(children) => children
                .iter()
                .filter(|(_, child)| child.leaf_count() > 0)
                .map(|(key, _)| key.clone())
                .collect(),
            DeltaNode::Array(children) => children
                .iter()
                .filter(|(_, child)| child.leaf_count() > 0)
                .map(|(i, _)| i.to_string())
                .collect(),
            DeltaNode::Added(_) | DeltaNode::Removed(_) | DeltaNode::Modified { .. } => {
                vec![ROOT_LABEL.to_string()]
            }
        }
    }

    /// Every leaf change with its path, in key/index order.
    pub fn changes(&self) -> Vec<Change<'_>> {
        let mut out = Vec::new();
        collect_changes(&self.root, DeltaPath::root(), &mut out);
        out
    }
}

fn collect_changes<'a>(node: &'a DeltaNode, path: DeltaPath, out: &mut Vec<Change<'a>>) {
    match node {
        DeltaNode::Unchanged => {}
        DeltaNode::Added(_) | DeltaNode::Removed(_) | DeltaNode::Modified { .. } => {
            out.push(Change { path, node });
        }
        DeltaNode::Array(children) => {
            for (i, child) in children {
                collect_changes(child, path.child(PathSegment::Index(*i)), out);
            }
        }
        DeltaNode::Object(children) => {
            for (key, child) in children {
                collect_changes(child, path.child(PathSegment::Key(key.clone())), out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn nested() -> Delta {
        let mut items = BTreeMap::new();
        items.insert(
            0,
            DeltaNode::Modified {
                old: json!("rank"),
                new: json!("ranking"),
            },
        );
        items.insert(2, DeltaNode::Added(json!({"title": "x"})));

        let mut schema = BTreeMap::new();
        schema.insert("items".to_string(), DeltaNode::Array(items));

        let mut root = BTreeMap::new();
        root.insert("schema".to_string(), DeltaNode::Object(schema));
        root.insert("entries".to_string(), DeltaNode::Removed(json!(33)));
        Delta::new(DeltaNode::Object(root))
    }

    #[test]
    fn empty_delta() {
        let delta = Delta::empty();
        assert!(delta.is_empty());
        assert_eq!(delta.leaf_count(), 0);
        assert!(delta.top_level_keys().is_empty());
        assert!(delta.changes().is_empty());
        assert_eq!(Delta::default(), delta);
    }

    #[test]
    fn containers_without_leaves_are_empty() {
        let mut root = BTreeMap::new();
        root.insert("a".to_string(), DeltaNode::Object(BTreeMap::new()));
        let delta = Delta::new(DeltaNode::Object(root));
        assert!(delta.is_empty());
        assert!(delta.top_level_keys().is_empty());
    }

    #[test]
    fn leaf_count_is_recursive() {
        assert_eq!(nested().leaf_count(), 3);
    }

    #[test]
    fn top_level_keys_are_not_recursive() {
        assert_eq!(nested().top_level_keys(), vec!["entries", "schema"]);
    }

    #[test]
    fn replaced_root_has_root_label() {
        let delta = Delta::new(DeltaNode::Modified {
            old: json!(1),
            new: json!([1]),
        });
        assert_eq!(delta.top_level_keys(), vec![ROOT_LABEL]);
        assert_eq!(delta.changes()[0].path, DeltaPath::root());
    }

    #[test]
    fn array_root_keys_are_indices() {
        let mut items = BTreeMap::new();
        items.insert(3, DeltaNode::Removed(json!("d")));
        let delta = Delta::new(DeltaNode::Array(items));
        assert_eq!(delta.top_level_keys(), vec!["3"]);
    }

    #[test]
    fn change_paths_are_pointers() {
        let paths: Vec<String> = nested()
            .changes()
            .iter()
            .map(|c| c.path.to_string())
            .collect();
        assert_eq!(
            paths,
            vec!["/entries", "/schema/items/0", "/schema/items/2"]
        );
    }

    #[test]
    fn pointer_segments_are_escaped() {
        let segments = vec![PathSegment::Key("a/b~c".into()), PathSegment::Index(1)];
        let path = DeltaPath(segments);
        assert_eq!(path.to_string(), "/a~1b~0c/1");
    }

    #[test]
    fn serde_roundtrip() {
        let delta = nested();
        let json = serde_json::to_string(&delta).unwrap();
        let parsed: Delta = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, delta);
    }
}
