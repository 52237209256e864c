use serde::{Deserialize, Serialize};

use crate::gate::DEFAULT_MIN_SIGNAL_LEN;

/// Configuration for record diffing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Consult identity signals before diffing. Disabling this never
    /// changes a result, only how long it takes.
    pub fast_path: bool,
    /// Minimum length for a path or fingerprint to count as a signal.
    pub min_signal_len: usize,
    /// Compare components on worker threads.
    pub parallel: bool,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            fast_path: true,
            min_signal_len: DEFAULT_MIN_SIGNAL_LEN,
            parallel: false,
        }
    }
}

impl DiffConfig {
    /// Always run the full diff.
    pub fn exhaustive() -> Self {
        Self {
            fast_path: false,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = DiffConfig::default();
        assert!(c.fast_path);
        assert_eq!(c.min_signal_len, 2);
        assert!(!c.parallel);
    }

    #[test]
    fn exhaustive_disables_fast_path() {
        let c = DiffConfig::exhaustive();
        assert!(!c.fast_path);
        assert_eq!(c.min_signal_len, DiffConfig::default().min_signal_len);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let c: DiffConfig = serde_json::from_str(r#"{"parallel": true}"#).unwrap();
        assert!(c.parallel);
        assert!(c.fast_path);
    }
}
