use tracing::debug;

use dsdiff_diff::SubDiff;

use crate::config::FormatConfig;
use crate::delta_tree::render_delta_tree;
use crate::error::{FormatError, FormatResult};
use crate::kind::FormatKind;
use crate::unified::{render_unified, UnifiedOptions};

/// Renders sub-diffs into text.
#[derive(Clone, Debug, Default)]
pub struct Formatter {
    config: FormatConfig,
}

impl Formatter {
    pub fn new(config: FormatConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    /// Render one sub-diff. An unmodified sub-diff renders as an empty
    /// string in every format.
    pub fn render(&self, sub: &SubDiff, kind: FormatKind) -> FormatResult<String> {
        let delta = sub.delta();
        if delta.is_empty() {
            return Ok(String::new());
        }
        let component = sub.component();
        if kind.needs_context() && sub.before().is_none() {
            return Err(FormatError::MissingContext {
                component,
                format: kind,
            });
        }
        debug!(%component, format = %kind, "rendering sub-diff");

        match kind {
            FormatKind::Simple => {
                let n = delta.top_level_keys().len();
                Ok(format!(
                    "{} Changed. ({n} change{})",
                    component.title(),
                    plural(n)
                ))
            }
            FormatKind::ListKeys => {
                let keys = delta.top_level_keys();
                let mut out = format!(
                    "{}: {} change{}",
                    component.title(),
                    keys.len(),
                    plural(keys.len())
                );
                for key in &keys {
                    out.push_str("\n\t- modified ");
                    out.push_str(key);
                }
                Ok(out)
            }
            FormatKind::UnifiedPlain | FormatKind::UnifiedColored => {
                let options = UnifiedOptions {
                    color: kind == FormatKind::UnifiedColored,
                    show_array_index: self.config.show_array_index,
                };
                render_unified(component, sub.before(), delta.root(), options)
            }
            FormatKind::DeltaTree => {
                render_delta_tree(delta.root(), self.config.text_diff_min_len)
            }
        }
    }
}

/// Render with the default configuration.
pub fn render(sub: &SubDiff, kind: FormatKind) -> FormatResult<String> {
    Formatter::default().render(sub, kind)
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsdiff_diff::{diff, Delta};
    use dsdiff_types::Component;
    use serde_json::json;

    #[test]
    fn simple_counts_top_level_keys() {
        let sub = SubDiff::compare(
            Component::Structure,
            json!({"a": 1, "b": {"c": 1, "d": 2}}),
            json!({"a": 2, "b": {"c": 3, "d": 4}}),
        );
        assert_eq!(sub.delta().leaf_count(), 3);
        assert_eq!(
            render(&sub, FormatKind::Simple).unwrap(),
            "Structure Changed. (2 changes)"
        );
        let listed = render(&sub, FormatKind::ListKeys).unwrap();
        assert!(listed.starts_with("Structure: 2 changes\n"));
    }

    #[test]
    fn simple_singular() {
        let sub = SubDiff::compare(Component::VisConfig, json!({"a": 1}), json!({"a": 2}));
        assert_eq!(
            render(&sub, FormatKind::Simple).unwrap(),
            "VisConfig Changed. (1 change)"
        );
    }

    #[test]
    fn list_keys_enumerates_top_level_only() {
        let sub = SubDiff::compare(
            Component::Meta,
            json!({"title": "a", "nested": {"x": 1, "y": 1}, "same": 0}),
            json!({"title": "b", "nested": {"x": 2, "y": 2}, "same": 0}),
        );
        assert_eq!(
            render(&sub, FormatKind::ListKeys).unwrap(),
            "Meta: 2 changes\n\t- modified nested\n\t- modified title"
        );
    }

    #[test]
    fn unified_without_before_fails() {
        let delta = diff(&json!({"a": 1}), &json!({"a": 2}));
        let sub = SubDiff::from_parts(Component::Transform, delta, None, None);
        for kind in [FormatKind::UnifiedPlain, FormatKind::UnifiedColored] {
            assert_eq!(
                render(&sub, kind),
                Err(FormatError::MissingContext {
                    component: Component::Transform,
                    format: kind
                })
            );
        }
        // Other formats only need the delta.
        assert!(render(&sub, FormatKind::Simple).is_ok());
        assert!(render(&sub, FormatKind::DeltaTree).is_ok());
    }

    #[test]
    fn empty_delta_is_empty_everywhere() {
        let sub = SubDiff::from_parts(Component::Meta, Delta::empty(), None, None);
        for kind in FormatKind::ALL {
            assert_eq!(render(&sub, kind).unwrap(), "");
        }
    }

    #[test]
    fn hidden_indices() {
        let formatter = Formatter::new(FormatConfig {
            show_array_index: false,
            ..Default::default()
        });
        let sub = SubDiff::compare(Component::Meta, json!({"k": ["a"]}), json!({"k": ["b"]}));
        let out = formatter.render(&sub, FormatKind::UnifiedPlain).unwrap();
        assert_eq!(out, " {\n   \"k\": [\n-    \"a\"\n+    \"b\"\n   ]\n }\n");
    }
}
