//! Plus/minus rendering of a delta against its before tree.
//!
//! The before document is printed as indented JSON with sorted keys. Each
//! line starts with a one-character marker: `' '` for context, `'-'` for
//! removed or old values, `'+'` for added or new values. A modification
//! prints its old value then its new value at the same position.

use std::collections::{BTreeMap, BTreeSet};

use dsdiff_diff::{DeltaNode, ROOT_LABEL};
use dsdiff_types::{Component, ValueTree};

use crate::error::{FormatError, FormatResult};

const INDENT: &str = "  ";
static UNCHANGED: DeltaNode = DeltaNode::Unchanged;

/// ANSI prefix for removed lines: black on red.
pub const REMOVED_COLOR: &str = "\x1b[30;41m";
/// ANSI prefix for added lines: black on green.
pub const ADDED_COLOR: &str = "\x1b[30;42m";
/// ANSI reset.
pub const RESET: &str = "\x1b[0m";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mark {
    Context,
    Removed,
    Added,
}

impl Mark {
    fn prefix(self) -> char {
        match self {
            Self::Context => ' ',
            Self::Removed => '-',
            Self::Added => '+',
        }
    }
}

/// Options for a unified rendering.
#[derive(Clone, Copy, Debug)]
pub(crate) struct UnifiedOptions {
    pub color: bool,
    pub show_array_index: bool,
}

/// Render `delta` applied to `before`.
pub(crate) fn render_unified(
    component: Component,
    before: Option<&ValueTree>,
    delta: &DeltaNode,
    options: UnifiedOptions,
) -> FormatResult<String> {
    let mut writer = Writer {
        component,
        options,
        out: String::new(),
    };
    writer.changed(0, None, before, delta, false)?;
    Ok(writer.out)
}

struct Writer {
    component: Component,
    options: UnifiedOptions,
    out: String,
}

impl Writer {
    fn line(&mut self, mark: Mark, depth: usize, text: &str) {
        let color = match (self.options.color, mark) {
            (true, Mark::Removed) => Some(REMOVED_COLOR),
            (true, Mark::Added) => Some(ADDED_COLOR),
            _ => None,
        };
        if let Some(code) = color {
            self.out.push_str(code);
        }
        self.out.push(mark.prefix());
        for _ in 0..depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        if color.is_some() {
            self.out.push_str(RESET);
        }
        self.out.push('\n');
    }

    /// Print a whole value with a single mark.
    fn value(
        &mut self,
        mark: Mark,
        depth: usize,
        label: Option<&str>,
        value: &ValueTree,
        comma: bool,
    ) {
        let head = head(label);
        let tail = tail(comma);
        match value {
            ValueTree::Object(members) if !members.is_empty() => {
                self.line(mark, depth, &format!("{head}{{"));
                let count = members.len();
                for (i, (key, member)) in members.iter().enumerate() {
                    let label = key_label(key);
                    let comma = i + 1 < count;
                    self.value(mark, depth + 1, Some(&label), member, comma);
                }
                self.line(mark, depth, &format!("}}{tail}"));
            }
            ValueTree::Array(items) if !items.is_empty() => {
                self.line(mark, depth, &format!("{head}["));
                let count = items.len();
                for (i, item) in items.iter().enumerate() {
                    let label = self.index_label(i);
                    let comma = i + 1 < count;
                    self.value(mark, depth + 1, label.as_deref(), item, comma);
                }
                self.line(mark, depth, &format!("]{tail}"));
            }
            scalar => self.line(mark, depth, &format!("{head}{scalar}{tail}")),
        }
    }

    /// Print a position of the before tree with its delta applied.
    fn changed(
        &mut self,
        depth: usize,
        label: Option<&str>,
        before: Option<&ValueTree>,
        node: &DeltaNode,
        comma: bool,
    ) -> FormatResult<()> {
        match (node, before) {
            (DeltaNode::Added(value), _) => self.value(Mark::Added, depth, label, value, comma),
            (DeltaNode::Removed(value), _) => self.value(Mark::Removed, depth, label, value, comma),
            (DeltaNode::Modified { old, new }, _) => {
                self.value(Mark::Removed, depth, label, old, comma);
                self.value(Mark::Added, depth, label, new, comma);
            }
            (DeltaNode::Unchanged, Some(value)) => {
                self.value(Mark::Context, depth, label, value, comma)
            }
            (DeltaNode::Object(children), Some(ValueTree::Object(members))) => {
                self.line(Mark::Context, depth, &format!("{}{{", head(label)));
                let keys: BTreeSet<&String> = members.keys().chain(children.keys()).collect();
                let count = keys.len();
                for (i, key) in keys.into_iter().enumerate() {
                    let label = key_label(key);
                    let member = members.get(key);
                    let child = children.get(key).unwrap_or(&UNCHANGED);
                    let comma = i + 1 < count;
                    self.changed(depth + 1, Some(&label), member, child, comma)?;
                }
                self.line(Mark::Context, depth, &format!("}}{}", tail(comma)));
            }
            (DeltaNode::Array(children), Some(ValueTree::Array(items))) => {
                self.line(Mark::Context, depth, &format!("{}[", head(label)));
                let count = array_extent(items.len(), children);
                for i in 0..count {
                    let label = self.index_label(i);
                    let item = items.get(i);
                    let child = children.get(&i).unwrap_or(&UNCHANGED);
                    let comma = i + 1 < count;
                    self.changed(depth + 1, label.as_deref(), item, child, comma)?;
                }
                self.line(Mark::Context, depth, &format!("]{}", tail(comma)));
            }
            _ => {
                return Err(FormatError::ContextMismatch {
                    component: self.component,
                    at: label.unwrap_or(ROOT_LABEL).to_string(),
                })
            }
        }
        Ok(())
    }

    fn index_label(&self, index: usize) -> Option<String> {
        self.options.show_array_index.then(|| index.to_string())
    }
}

/// Number of positions to print for an array: the before length, extended
/// by any trailing additions.
fn array_extent(before_len: usize, children: &BTreeMap<usize, DeltaNode>) -> usize {
    children
        .keys()
        .next_back()
        .map_or(before_len, |last| before_len.max(last + 1))
}

fn head(label: Option<&str>) -> String {
    label.map(|l| format!("{l}: ")).unwrap_or_default()
}

fn tail(comma: bool) -> &'static str {
    if comma {
        ","
    } else {
        ""
    }
}

fn key_label(key: &str) -> String {
    ValueTree::String(key.to_string()).to_string()
}
