//! Summaries across a whole diff map.

use dsdiff_diff::DiffMap;
use dsdiff_types::{Component, COMPONENT_SET};

use crate::error::FormatResult;
use crate::formatter::Formatter;
use crate::kind::FormatKind;

impl Formatter {
    /// The summary of the highest-priority changed component, or an empty
    /// string when nothing changed. Lower-priority changes are not reported.
    pub fn select_summary(&self, map: &DiffMap, kind: FormatKind) -> FormatResult<String> {
        for component in COMPONENT_SET {
            let Some(sub) = map.get(component) else {
                continue;
            };
            let rendered = self.render(sub, kind)?;
            if !rendered.is_empty() {
                return Ok(rendered);
            }
        }
        Ok(String::new())
    }

    /// Every non-empty summary, in priority order.
    pub fn summarize_all(
        &self,
        map: &DiffMap,
        kind: FormatKind,
    ) -> FormatResult<Vec<(Component, String)>> {
        let mut out = Vec::new();
        for component in COMPONENT_SET {
            let Some(sub) = map.get(component) else {
                continue;
            };
            let rendered = self.render(sub, kind)?;
            if !rendered.is_empty() {
                out.push((component, rendered));
            }
        }
        Ok(out)
    }
}

/// [`Formatter::select_summary`] with the default configuration.
pub fn select_summary(map: &DiffMap, kind: FormatKind) -> FormatResult<String> {
    Formatter::default().select_summary(map, kind)
}

/// [`Formatter::summarize_all`] with the default configuration.
pub fn summarize_all(map: &DiffMap, kind: FormatKind) -> FormatResult<Vec<(Component, String)>> {
    Formatter::default().summarize_all(map, kind)
}
