use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FormatError;

/// The textual views a sub-diff can be rendered into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormatKind {
    /// One line: component and change count.
    #[serde(rename = "simple")]
    Simple,
    /// Count header plus one line per changed top-level key.
    #[serde(rename = "listKeys")]
    ListKeys,
    /// The before document with `-`/`+` lines for changes.
    #[serde(rename = "plusMinus")]
    UnifiedPlain,
    /// [`FormatKind::UnifiedPlain`] with ANSI colours on changed lines.
    #[serde(rename = "plusMinusColor")]
    UnifiedColored,
    /// The delta itself as pretty-printed JSON.
    #[serde(rename = "delta")]
    DeltaTree,
}

impl FormatKind {
    pub const ALL: [FormatKind; 5] = [
        Self::Simple,
        Self::ListKeys,
        Self::UnifiedPlain,
        Self::UnifiedColored,
        Self::DeltaTree,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::ListKeys => "listKeys",
            Self::UnifiedPlain => "plusMinus",
            Self::UnifiedColored => "plusMinusColor",
            Self::DeltaTree => "delta",
        }
    }

    /// Whether rendering needs the full before tree.
    pub fn needs_context(&self) -> bool {
        matches!(self, Self::UnifiedPlain | Self::UnifiedColored)
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormatKind {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| FormatError::UnknownFormat(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_roundtrip() {
        for kind in FormatKind::ALL {
            assert_eq!(kind.name().parse::<FormatKind>().unwrap(), kind);
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.name()));
        }
    }

    #[test]
    fn unknown_name() {
        assert_eq!(
            "markdown".parse::<FormatKind>(),
            Err(FormatError::UnknownFormat("markdown".into()))
        );
    }

    #[test]
    fn only_unified_needs_context() {
        let needing: Vec<_> = FormatKind::ALL
            .into_iter()
            .filter(|k| k.needs_context())
            .collect();
        assert_eq!(
            needing,
            vec![FormatKind::UnifiedPlain, FormatKind::UnifiedColored]
        );
    }
}
