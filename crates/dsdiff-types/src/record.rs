//! The record model handed to the diff engine.
//!
//! A [`Record`] is a set of optional [`SubDocument`]s, one per
//! [`Component`]. Each sub-document carries its content, either already
//! parsed or as raw JSON bytes, plus the identity signals the loader knew.

use std::borrow::Cow;

use serde::Serialize;
use serde_json::Map;

use crate::component::{Component, COMPONENT_SET};
use crate::error::TypeError;
use crate::signal::IdentitySignals;
use crate::value::ValueTree;

/// Top-level key holding the payload content in a record document.
pub const BODY_KEY: &str = "body";
/// Top-level key holding the payload storage path in a record document.
pub const BODY_PATH_KEY: &str = "bodyPath";

/// Content of a sub-document.
#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    /// Already parsed.
    Tree(ValueTree),
    /// Raw JSON bytes, parsed on demand.
    Raw(Vec<u8>),
}

/// One component of a record: content plus identity signals.
#[derive(Clone, Debug, PartialEq)]
pub struct SubDocument {
    pub signals: IdentitySignals,
    pub body: Body,
}

impl SubDocument {
    pub fn from_tree(tree: ValueTree) -> Self {
        Self {
            signals: IdentitySignals::none(),
            body: Body::Tree(tree),
        }
    }

    pub fn from_raw(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            signals: IdentitySignals::none(),
            body: Body::Raw(bytes.into()),
        }
    }

    /// Build a sub-document from any serializable value.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self, TypeError> {
        let tree = serde_json::to_value(value)
            .map_err(|e| TypeError::Serialization(e.to_string()))?;
        Ok(Self::from_tree(tree))
    }

    pub fn with_signals(mut self, signals: IdentitySignals) -> Self {
        self.signals = signals;
        self
    }

    /// The content as a value tree, parsing raw bytes if necessary.
    pub fn to_tree(&self) -> Result<Cow<'_, ValueTree>, serde_json::Error> {
        match &self.body {
            Body::Tree(tree) => Ok(Cow::Borrowed(tree)),
            Body::Raw(bytes) => serde_json::from_slice(bytes).map(Cow::Owned),
        }
    }
}

/// A composite document made of independently versioned components.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    pub structure: Option<SubDocument>,
    pub data: Option<SubDocument>,
    pub transform: Option<SubDocument>,
    pub meta: Option<SubDocument>,
    pub vis_config: Option<SubDocument>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Record::set`].
    pub fn with(mut self, component: Component, doc: SubDocument) -> Self {
        self.set(component, doc);
        self
    }

    pub fn get(&self, component: Component) -> Option<&SubDocument> {
        self.slot(component).as_ref()
    }

    pub fn set(&mut self, component: Component, doc: SubDocument) {
        *self.slot_mut(component) = Some(doc);
    }

    pub fn remove(&mut self, component: Component) -> Option<SubDocument> {
        self.slot_mut(component).take()
    }

    /// Components present in this record, in priority order.
    pub fn components(&self) -> impl Iterator<Item = Component> + '_ {
        COMPONENT_SET.into_iter().filter(|c| self.get(*c).is_some())
    }

    fn slot(&self, component: Component) -> &Option<SubDocument> {
        match component {
            Component::Structure => &self.structure,
            Component::Data => &self.data,
            Component::Transform => &self.transform,
            Component::Meta => &self.meta,
            Component::VisConfig => &self.vis_config,
        }
    }

    fn slot_mut(&mut self, component: Component) -> &mut Option<SubDocument> {
        match component {
            Component::Structure => &mut self.structure,
            Component::Data => &mut self.data,
            Component::Transform => &mut self.transform,
            Component::Meta => &mut self.meta,
            Component::VisConfig => &mut self.vis_config,
        }
    }

    /// Load a record from a dataset-style JSON document.
    ///
    /// Definition components live under their canonical names. Their
    /// `path` string becomes the path signal and is dropped from the
    /// content; a `checksum` string becomes the fingerprint signal and is
    /// kept. The payload lives under `body`, with `bodyPath` as its path
    /// signal. Missing or `null` components are absent.
    pub fn from_json(doc: &ValueTree) -> Result<Self, TypeError> {
        let obj = doc
            .as_object()
            .ok_or_else(|| TypeError::NotAnObject("record".into()))?;

        let mut record = Self::new();
        for component in COMPONENT_SET {
            if component.is_payload() {
                continue;
            }
            match obj.get(component.name()) {
                None | Some(ValueTree::Null) => {}
                Some(ValueTree::Object(fields)) => {
                    record.set(component, definition_document(fields));
                }
                Some(_) => return Err(TypeError::NotAnObject(component.name().into())),
            }
        }

        match obj.get(BODY_KEY) {
            None | Some(ValueTree::Null) => {}
            Some(body) => {
                let mut signals = IdentitySignals::none();
                if let Some(path) = obj.get(BODY_PATH_KEY).and_then(ValueTree::as_str) {
                    signals = signals.with_path(path);
                }
                record.set(
                    Component::Data,
                    SubDocument::from_tree(body.clone()).with_signals(signals),
                );
            }
        }

        Ok(record)
    }

    /// Parse raw JSON bytes and load them with [`Record::from_json`].
    pub fn from_slice(bytes: &[u8]) -> Result<Self, TypeError> {
        let doc: ValueTree = serde_json::from_slice(bytes)
            .map_err(|e| TypeError::Serialization(e.to_string()))?;
        Self::from_json(&doc)
    }
}

fn definition_document(fields: &Map<String, ValueTree>) -> SubDocument {
    let mut content = fields.clone();
    let mut signals = IdentitySignals::none();
    if let Some(ValueTree::String(path)) = content.remove("path") {
        signals = signals.with_path(path);
    }
    if let Some(checksum) = content.get("checksum").and_then(ValueTree::as_str) {
        signals = signals.with_fingerprint(checksum);
    }
    SubDocument::from_tree(ValueTree::Object(content)).with_signals(signals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ValueTree {
        json!({
            "bodyPath": "/ipfs/QmBody",
            "body": [["a", 1], ["b", 2]],
            "structure": {
                "path": "/ipfs/QmStructure",
                "checksum": "QmChecksum",
                "format": "json",
                "schema": {"type": "array"}
            },
            "meta": {"title": "abc", "qri": "md:0"},
            "transform": null
        })
    }

    #[test]
    fn loads_definition_components() {
        let record = Record::from_json(&sample()).unwrap();
        let structure = record.get(Component::Structure).unwrap();
        assert_eq!(structure.signals.path.as_deref(), Some("/ipfs/QmStructure"));
        assert_eq!(structure.signals.fingerprint.as_deref(), Some("QmChecksum"));

        let tree = structure.to_tree().unwrap();
        assert!(tree.get("path").is_none());
        assert_eq!(tree["checksum"], json!("QmChecksum"));

        let meta = record.get(Component::Meta).unwrap();
        assert_eq!(meta.signals, IdentitySignals::none());
    }

    #[test]
    fn loads_payload_with_body_path() {
        let record = Record::from_json(&sample()).unwrap();
        let data = record.get(Component::Data).unwrap();
        assert_eq!(data.signals.path.as_deref(), Some("/ipfs/QmBody"));
        assert_eq!(*data.to_tree().unwrap(), json!([["a", 1], ["b", 2]]));
    }

    #[test]
    fn null_and_missing_components_are_absent() {
        let record = Record::from_json(&sample()).unwrap();
        assert!(record.get(Component::Transform).is_none());
        assert!(record.get(Component::VisConfig).is_none());
        let present: Vec<_> = record.components().collect();
        assert_eq!(
            present,
            vec![Component::Structure, Component::Data, Component::Meta]
        );
    }

    #[test]
    fn rejects_non_object_record() {
        assert_eq!(
            Record::from_json(&json!([1, 2])),
            Err(TypeError::NotAnObject("record".into()))
        );
    }

    #[test]
    fn rejects_non_object_component() {
        assert_eq!(
            Record::from_json(&json!({"meta": "md:0"})),
            Err(TypeError::NotAnObject("meta".into()))
        );
    }

    #[test]
    fn raw_body_parses_on_demand() {
        let doc = SubDocument::from_raw(br#"{"a": 1}"#.to_vec());
        assert_eq!(*doc.to_tree().unwrap(), json!({"a": 1}));

        let bad = SubDocument::from_raw(b"{not json".to_vec());
        assert!(bad.to_tree().is_err());
    }

    #[test]
    fn from_slice_reports_parse_errors() {
        assert!(matches!(
            Record::from_slice(b"{"),
            Err(TypeError::Serialization(_))
        ));
    }

    #[test]
    fn set_get_remove() {
        let doc = SubDocument::from_tree(json!({}));
        let mut record = Record::new().with(Component::Meta, doc);
        assert!(record.get(Component::Meta).is_some());
        assert!(record.remove(Component::Meta).is_some());
        assert!(record.get(Component::Meta).is_none());
    }

    #[test]
    fn from_serialize_builds_tree() {
        #[derive(Serialize)]
        struct Meta {
            title: &'static str,
        }
        let doc = SubDocument::from_serialize(&Meta { title: "abc" }).unwrap();
        assert_eq!(*doc.to_tree().unwrap(), json!({"title": "abc"}));
    }
}
