//! Value-tree diff: compare two parsed documents and produce a [`Delta`].
//!
//! Objects are compared key by key and arrays index by index. Arrays are
//! aligned by position, not by a minimal edit script: inserting an element
//! at the front reports every following index as modified plus one trailing
//! addition.

use std::collections::BTreeMap;

use serde_json::Map;

use dsdiff_types::ValueTree;

use crate::delta::{Delta, DeltaNode};

/// Compute the delta from `old` to `new`.
///
/// Total over all trees: values of different kinds are reported as a
/// single [`DeltaNode::Modified`] instead of being recursed into.
pub fn diff(old: &ValueTree, new: &ValueTree) -> Delta {
    Delta::new(diff_node(old, new))
}

fn diff_node(old: &ValueTree, new: &ValueTree) -> DeltaNode {
    match (old, new) {
        (ValueTree::Object(a), ValueTree::Object(b)) => diff_objects(a, b),
        (ValueTree::Array(a), ValueTree::Array(b)) => diff_arrays(a, b),
        _ if old == new => DeltaNode::Unchanged,
        _ => DeltaNode::Modified {
            old: old.clone(),
            new: new.clone(),
        },
    }
}

fn diff_objects(old: &Map<String, ValueTree>, new: &Map<String, ValueTree>) -> DeltaNode {
    let mut children = BTreeMap::new();

    // Removed and common keys.
    for (key, old_val) in old {
        let child = match new.get(key) {
            Some(new_val) => diff_node(old_val, new_val),
            None => DeltaNode::Removed(old_val.clone()),
        };
        if !child.is_unchanged() {
            children.insert(key.clone(), child);
        }
    }

    // Added keys.
    for (key, new_val) in new {
        if !old.contains_key(key) {
            children.insert(key.clone(), DeltaNode::Added(new_val.clone()));
        }
    }

    if children.is_empty() {
        DeltaNode::Unchanged
    } else {
        DeltaNode::Object(children)
    }
}

fn diff_arrays(old: &[ValueTree], new: &[ValueTree]) -> DeltaNode {
    let mut children = BTreeMap::new();
    let common = old.len().min(new.len());

    for (i, (old_val, new_val)) in old.iter().zip(new).enumerate() {
        let child = diff_node(old_val, new_val);
        if !child.is_unchanged() {
            children.insert(i, child);
        }
    }
    for (i, old_val) in old.iter().enumerate().skip(common) {
        children.insert(i, DeltaNode::Removed(old_val.clone()));
    }
    for (i, new_val) in new.iter().enumerate().skip(common) {
        children.insert(i, DeltaNode::Added(new_val.clone()));
    }

    if children.is_empty() {
        DeltaNode::Unchanged
    } else {
        DeltaNode::Array(children)
    }
}
