//! Character-level text patches for long string modifications.
//!
//! Uses the `similar` crate (Myers diff algorithm) over characters and
//! prints hunks in the compact `@@ -a,b +c,d @@` patch text used inside
//! delta trees: one line per run, prefixed with `' '`, `'-'`, or `'+'`.

use similar::{DiffTag, TextDiff};

/// Characters of unchanged context kept around each change.
pub const PATCH_MARGIN: usize = 4;

/// Compute a character-level patch turning `old` into `new`.
///
/// Returns an empty string when the inputs are identical. `%` and newlines
/// inside runs are percent-encoded so that every run stays on one line.
pub fn text_patch(old: &str, new: &str) -> String {
    if old == new {
        return String::new();
    }

    let text_diff = TextDiff::from_chars(old, new);
    let old_chars = text_diff.old_slices();
    let new_chars = text_diff.new_slices();

    let mut out = String::new();
    for group in text_diff.grouped_ops(PATCH_MARGIN) {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            continue;
        };
        let old_start = first.old_range().start;
        let new_start = first.new_range().start;
        let old_len = last.old_range().end - old_start;
        let new_len = last.new_range().end - new_start;
        out.push_str(&format!(
            "@@ -{} +{} @@\n",
            coords(old_start, old_len),
            coords(new_start, new_len)
        ));

        for op in &group {
            let (tag, old_range, new_range) = op.as_tag_tuple();
            let removed = old_chars[old_range].concat();
            let added = new_chars[new_range].concat();
            match tag {
                DiffTag::Equal => push_run(&mut out, ' ', &removed),
                DiffTag::Delete => push_run(&mut out, '-', &removed),
                DiffTag::Insert => push_run(&mut out, '+', &added),
                DiffTag::Replace => {
                    push_run(&mut out, '-', &removed);
                    push_run(&mut out, '+', &added);
                }
            }
        }
    }
    out
}

/// Hunk coordinates: 1-based start, with the length omitted when it is 1.
fn coords(start: usize, len: usize) -> String {
    match len {
        0 => format!("{start},0"),
        1 => format!("{}", start + 1),
        _ => format!("{},{}", start + 1, len),
    }
}

fn push_run(out: &mut String, marker: char, text: &str) {
    out.push(marker);
    out.push_str(&text.replace('%', "%25").replace('\n', "%0A"));
    out.push('\n');
}
