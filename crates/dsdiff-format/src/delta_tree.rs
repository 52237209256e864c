//! Delta rendering in the jsondiffpatch layout.
//!
//! | change             | encoding                 |
//! |--------------------|--------------------------|
//! | added              | `[new]`                  |
//! | modified           | `[old, new]`             |
//! | long text modified | `[patch, 0, 2]`          |
//! | removed            | `[old, 0, 0]`            |
//! | array container    | object with `"_t": "a"`  |
//!
//! Removed array elements are keyed `_<index>`, every other array entry by
//! its plain index.

use serde_json::{json, Map};

use dsdiff_diff::DeltaNode;
use dsdiff_types::ValueTree;

use crate::error::{FormatError, FormatResult};
use crate::text_patch::text_patch;

const ARRAY_MARKER_KEY: &str = "_t";
const ARRAY_MARKER: &str = "a";
const TEXT_DIFF_TAG: u8 = 2;

/// Encode a delta node. Unchanged nodes encode as `None`.
pub(crate) fn encode(node: &DeltaNode, text_diff_min_len: usize) -> Option<ValueTree> {
    let encoded = match node {
        DeltaNode::Unchanged => return None,
        DeltaNode::Added(new) => json!([new]),
        DeltaNode::Removed(old) => json!([old, 0, 0]),
        DeltaNode::Modified { old, new } => match (old, new) {
            (ValueTree::String(o), ValueTree::String(n))
                if o.chars().count() >= text_diff_min_len
                    && n.chars().count() >= text_diff_min_len =>
            {
                json!([text_patch(o, n), 0, TEXT_DIFF_TAG])
            }
            _ => json!([old, new]),
        },
        DeltaNode::Object(children) => {
            let mut members = Map::new();
            for (key, child) in children {
                if let Some(value) = encode(child, text_diff_min_len) {
                    members.insert(key.clone(), value);
                }
            }
            ValueTree::Object(members)
        }
        DeltaNode::Array(children) => {
            let mut members = Map::new();
            members.insert(ARRAY_MARKER_KEY.to_string(), json!(ARRAY_MARKER));
            for (index, child) in children {
                let Some(value) = encode(child, text_diff_min_len) else {
                    continue;
                };
                let key = match child {
                    DeltaNode::Removed(_) => format!("_{index}"),
                    _ => index.to_string(),
                };
                members.insert(key, value);
            }
            ValueTree::Object(members)
        }
    };
    Some(encoded)
}

/// Pretty-printed delta with a trailing newline. Empty deltas render as "".
pub(crate) fn render_delta_tree(
    node: &DeltaNode,
    text_diff_min_len: usize,
) -> FormatResult<String> {
    if node.leaf_count() == 0 {
        return Ok(String::new());
    }
    let value = encode(node, text_diff_min_len).unwrap_or_default();
    let mut out = serde_json::to_string_pretty(&value)
        .map_err(|e| FormatError::Serialization(e.to_string()))?;
    out.push('\n');
    Ok(out)
}
