use serde::{Deserialize, Serialize};

/// Configuration for rendering sub-diffs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Label array elements with their index in unified output.
    pub show_array_index: bool,
    /// Both sides of a string modification must be at least this many
    /// characters for the delta format to emit a text patch instead of
    /// the full old/new pair.
    pub text_diff_min_len: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            show_array_index: true,
            text_diff_min_len: 30,
        }
    }
}
