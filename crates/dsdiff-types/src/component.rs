use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// One of the independently versioned sub-documents of a record.
///
/// The derived ordering is the summary priority: a lower variant outranks a
/// higher one, so `BTreeMap<Component, _>` iterates in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Component {
    /// Structural schema of the payload.
    Structure,
    /// The payload itself.
    Data,
    /// Transform definition that produced the payload.
    Transform,
    /// Descriptive metadata.
    Meta,
    /// Visual configuration.
    VisConfig,
}

/// Every component, highest priority first.
pub const COMPONENT_SET: [Component; 5] = [
    Component::Structure,
    Component::Data,
    Component::Transform,
    Component::Meta,
    Component::VisConfig,
];

impl Component {
    /// The canonical component name, e.g. `"visConfig"`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Structure => "structure",
            Self::Data => "data",
            Self::Transform => "transform",
            Self::Meta => "meta",
            Self::VisConfig => "visConfig",
        }
    }

    /// The name with its first letter upper-cased, e.g. `"VisConfig"`.
    pub fn title(&self) -> String {
        let name = self.name();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Position in [`COMPONENT_SET`]; 0 is the highest priority.
    pub fn priority(&self) -> usize {
        *self as usize
    }

    /// Whether this component holds payload content rather than a
    /// definition document.
    pub fn is_payload(&self) -> bool {
        matches!(self, Self::Data)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Component {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        COMPONENT_SET
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| TypeError::UnknownComponent(s.to_string()))
    }
}
