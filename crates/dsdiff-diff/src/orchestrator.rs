//! Component orchestration: diff every component two records share.
//!
//! For each component in [`COMPONENT_SET`] that is present on both sides,
//! the fast-path gate runs first. If it proves equality the component is
//! recorded as compared-but-unchanged; otherwise both sides are
//! materialized and handed to the tree differ.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use dsdiff_types::{Component, Record, SubDocument, ValueTree, COMPONENT_SET};

use crate::config::DiffConfig;
use crate::delta::Delta;
use crate::error::{DiffError, DiffResult, Side};
use crate::gate::{FastPathGate, GatePolicy, Shortcut};
use crate::tree_diff::diff;

/// The diff of one component.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SubDiff {
    component: Component,
    delta: Delta,
    /// `None` when the gate skipped materialization.
    before: Option<ValueTree>,
    after: Option<ValueTree>,
}

impl SubDiff {
    /// A component that was compared and found unchanged without looking
    /// at its content.
    pub fn unchanged(component: Component) -> Self {
        Self {
            component,
            delta: Delta::empty(),
            before: None,
            after: None,
        }
    }

    /// Diff two materialized trees.
    pub fn compare(component: Component, before: ValueTree, after: ValueTree) -> Self {
        let delta = diff(&before, &after);
        Self {
            component,
            delta,
            before: Some(before),
            after: Some(after),
        }
    }

    /// Parse two raw JSON documents and diff them.
    pub fn from_json(component: Component, a: &[u8], b: &[u8]) -> DiffResult<Self> {
        let before: ValueTree = serde_json::from_slice(a)
            .map_err(|e| DiffError::serialization(component, Side::A, e))?;
        let after: ValueTree = serde_json::from_slice(b)
            .map_err(|e| DiffError::serialization(component, Side::B, e))?;
        Ok(Self::compare(component, before, after))
    }

    /// Assemble a sub-diff from a delta computed elsewhere.
    pub fn from_parts(
        component: Component,
        delta: Delta,
        before: Option<ValueTree>,
        after: Option<ValueTree>,
    ) -> Self {
        Self {
            component,
            delta,
            before,
            after,
        }
    }

    pub fn component(&self) -> Component {
        self.component
    }

    pub fn delta(&self) -> &Delta {
        &self.delta
    }

    /// The old tree, kept as rendering context.
    pub fn before(&self) -> Option<&ValueTree> {
        self.before.as_ref()
    }

    pub fn after(&self) -> Option<&ValueTree> {
        self.after.as_ref()
    }

    /// Returns `true` if the delta holds any change.
    pub fn is_modified(&self) -> bool {
        !self.delta.is_empty()
    }
}

/// Sub-diffs keyed by component, iterated in priority order.
///
/// A missing component was not compared because it is absent from at
/// least one record. A present component with an empty delta was compared
/// and did not change.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DiffMap {
    entries: BTreeMap<Component, SubDiff>,
}

impl DiffMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, sub: SubDiff) {
        self.entries.insert(sub.component(), sub);
    }

    pub fn get(&self, component: Component) -> Option<&SubDiff> {
        self.entries.get(&component)
    }

    pub fn contains(&self, component: Component) -> bool {
        self.entries.contains_key(&component)
    }

    /// Number of compared components.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubDiff> {
        self.entries.values()
    }

    /// Compared components whose delta is non-empty.
    pub fn changed(&self) -> impl Iterator<Item = &SubDiff> {
        self.iter().filter(|sub| sub.is_modified())
    }

    /// Returns `true` if any compared component changed.
    pub fn is_modified(&self) -> bool {
        self.changed().next().is_some()
    }
}

impl FromIterator<SubDiff> for DiffMap {
    fn from_iter<I: IntoIterator<Item = SubDiff>>(iter: I) -> Self {
        let mut map = Self::new();
        for sub in iter {
            map.insert(sub);
        }
        map
    }
}

/// A fully de-referenced payload pair supplied by the caller.
///
/// When given, the payload component is diffed from these bytes directly,
/// ignoring any path signals on the records.
#[derive(Clone, Copy, Debug)]
pub struct PayloadPair<'a> {
    pub a: &'a [u8],
    pub b: &'a [u8],
}

impl<'a> PayloadPair<'a> {
    pub fn new(a: &'a [u8], b: &'a [u8]) -> Self {
        Self { a, b }
    }
}

enum Task<'a> {
    Documents(&'a SubDocument, &'a SubDocument),
    Payload(PayloadPair<'a>),
}

/// Diffs records component by component.
#[derive(Clone, Debug, Default)]
pub struct RecordDiffer {
    config: DiffConfig,
}

impl RecordDiffer {
    pub fn new(config: DiffConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    /// Diff every component present in both records.
    ///
    /// Any serialization failure aborts the whole call; no partial map is
    /// returned. With several failures the highest-priority component is
    /// reported.
    pub fn diff_records(
        &self,
        a: &Record,
        b: &Record,
        payload: Option<PayloadPair<'_>>,
    ) -> DiffResult<DiffMap> {
        let tasks = plan(a, b, payload);
        debug!(
            components = tasks.len(),
            parallel = self.config.parallel,
            "diffing records"
        );

        let results: Vec<DiffResult<SubDiff>> = if self.config.parallel && tasks.len() > 1 {
            std::thread::scope(|scope| {
                let handles: Vec<_> = tasks
                    .iter()
                    .map(|(component, task)| {
                        scope.spawn(move || self.run(*component, task))
                    })
                    .collect();
                handles
                    .into_iter()
                    .map(|handle| match handle.join() {
                        Ok(result) => result,
                        Err(panic) => std::panic::resume_unwind(panic),
                    })
                    .collect()
            })
        } else {
            tasks
                .iter()
                .map(|(component, task)| self.run(*component, task))
                .collect()
        };

        results.into_iter().collect()
    }

    /// Diff a single component, consulting the gate first.
    pub fn diff_component(
        &self,
        component: Component,
        a: &SubDocument,
        b: &SubDocument,
    ) -> DiffResult<SubDiff> {
        if self.config.fast_path {
            let gate = FastPathGate::new(self.config.min_signal_len);
            match gate.check(GatePolicy::for_component(component), &a.signals, &b.signals) {
                Some(Shortcut::Equal(signal)) => {
                    debug!(%component, %signal, "identity signals match; skipping diff");
                    return Ok(SubDiff::unchanged(component));
                }
                Some(Shortcut::NotEqual(signal)) => {
                    debug!(%component, %signal, "identity signal differs; running full diff");
                }
                None => {}
            }
        }

        let before = materialize(component, Side::A, a)?;
        let after = materialize(component, Side::B, b)?;
        let sub = SubDiff::compare(component, before, after);
        debug!(%component, changes = sub.delta().leaf_count(), "component diffed");
        Ok(sub)
    }

    fn run(&self, component: Component, task: &Task<'_>) -> DiffResult<SubDiff> {
        match task {
            Task::Documents(a, b) => self.diff_component(component, a, b),
            Task::Payload(pair) => {
                debug!(%component, "diffing de-referenced payload");
                let sub = SubDiff::from_json(component, pair.a, pair.b)?;
                debug!(%component, changes = sub.delta().leaf_count(), "component diffed");
                Ok(sub)
            }
        }
    }
}

fn plan<'a>(
    a: &'a Record,
    b: &'a Record,
    payload: Option<PayloadPair<'a>>,
) -> Vec<(Component, Task<'a>)> {
    let mut tasks = Vec::new();
    for component in COMPONENT_SET {
        if component.is_payload() {
            if let Some(pair) = payload {
                tasks.push((component, Task::Payload(pair)));
                continue;
            }
        }
        match (a.get(component), b.get(component)) {
            (Some(da), Some(db)) => tasks.push((component, Task::Documents(da, db))),
            _ => debug!(%component, "component missing on one side; skipped"),
        }
    }
    tasks
}

fn materialize(component: Component, side: Side, doc: &SubDocument) -> DiffResult<ValueTree> {
    doc.to_tree()
        .map(|tree| tree.into_owned())
        .map_err(|e| DiffError::serialization(component, side, e))
}

/// Diff two records with the default configuration.
pub fn diff_components(
    a: &Record,
    b: &Record,
    payload: Option<PayloadPair<'_>>,
) -> DiffResult<DiffMap> {
    RecordDiffer::default().diff_records(a, b, payload)
}
