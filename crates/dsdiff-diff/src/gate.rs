//! Fast-path equality gate.
//!
//! Before materializing and diffing two sub-documents, the gate looks at
//! their identity signals. Equal storage paths or equal fingerprints prove
//! the documents are equal. Nothing the gate sees can prove they differ:
//! the only negative outcome it produces, a moved payload path, is
//! informational and still sends the component through the full diff.

use std::fmt;

use dsdiff_types::{Component, IdentitySignals};

/// Signals shorter than this never participate in the shortcut.
pub const DEFAULT_MIN_SIGNAL_LEN: usize = 2;

/// Which identity signal decided a shortcut.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Signal {
    Path,
    Fingerprint,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path => f.write_str("path"),
            Self::Fingerprint => f.write_str("fingerprint"),
        }
    }
}

/// Outcome of a conclusive gate check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shortcut {
    /// The documents are equal; diffing can be skipped.
    Equal(Signal),
    /// The signal differs. Never proof of a content change.
    NotEqual(Signal),
}

impl Shortcut {
    pub fn is_equal(&self) -> bool {
        matches!(self, Self::Equal(_))
    }
}

/// How the gate treats a given component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GatePolicy {
    /// Report differing storage paths as [`Shortcut::NotEqual`].
    pub report_moved_path: bool,
}

impl GatePolicy {
    /// Payload content can be re-stored at a new location without
    /// changing, so a moved payload path is reported. Definition
    /// components simply fall through on any path mismatch.
    pub fn for_component(component: Component) -> Self {
        Self {
            report_moved_path: component.is_payload(),
        }
    }
}

/// Checks identity signals before a full diff.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FastPathGate {
    min_signal_len: usize,
}

impl Default for FastPathGate {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SIGNAL_LEN)
    }
}

impl FastPathGate {
    pub fn new(min_signal_len: usize) -> Self {
        Self { min_signal_len }
    }

    pub fn min_signal_len(&self) -> usize {
        self.min_signal_len
    }

    /// Check two sets of signals, first applicable rule wins:
    ///
    /// 1. equal non-trivial paths on both sides -> `Equal(Path)`
    /// 2. equal non-trivial fingerprints on both sides -> `Equal(Fingerprint)`
    /// 3. differing non-trivial paths under a reporting policy -> `NotEqual(Path)`
    /// 4. otherwise `None`
    pub fn check(
        &self,
        policy: GatePolicy,
        a: &IdentitySignals,
        b: &IdentitySignals,
    ) -> Option<Shortcut> {
        let paths = a
            .usable_path(self.min_signal_len)
            .zip(b.usable_path(self.min_signal_len));
        if let Some((pa, pb)) = paths {
            if pa == pb {
                return Some(Shortcut::Equal(Signal::Path));
            }
        }

        let fingerprints = a
            .usable_fingerprint(self.min_signal_len)
            .zip(b.usable_fingerprint(self.min_signal_len));
        if let Some((fa, fb)) = fingerprints {
            if fa == fb {
                return Some(Shortcut::Equal(Signal::Fingerprint));
            }
        }

        if policy.report_moved_path && paths.is_some() {
            return Some(Shortcut::NotEqual(Signal::Path));
        }

        None
    }
}

/// Run the default gate with the policy for `component`.
pub fn try_short_circuit(
    component: Component,
    a: &IdentitySignals,
    b: &IdentitySignals,
) -> Option<Shortcut> {
    FastPathGate::default().check(GatePolicy::for_component(component), a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(p: &str) -> IdentitySignals {
        IdentitySignals::none().with_path(p)
    }

    fn fp(f: &str) -> IdentitySignals {
        IdentitySignals::none().with_fingerprint(f)
    }

    #[test]
    fn equal_paths_short_circuit() {
        assert_eq!(
            try_short_circuit(Component::Structure, &path("/ipfs/QmA"), &path("/ipfs/QmA")),
            Some(Shortcut::Equal(Signal::Path))
        );
    }

    #[test]
    fn equal_fingerprints_short_circuit() {
        assert_eq!(
            try_short_circuit(Component::Structure, &fp("QmSum"), &fp("QmSum")),
            Some(Shortcut::Equal(Signal::Fingerprint))
        );
    }

    #[test]
    fn path_rule_wins_over_fingerprint() {
        let a = path("/ipfs/QmA").with_fingerprint("one");
        let b = path("/ipfs/QmA").with_fingerprint("two");
        assert_eq!(
            try_short_circuit(Component::Meta, &a, &b),
            Some(Shortcut::Equal(Signal::Path))
        );
    }

    #[test]
    fn differing_paths_fall_back_to_fingerprint() {
        let a = path("/ipfs/QmA").with_fingerprint("same");
        let b = path("/ipfs/QmB").with_fingerprint("same");
        assert_eq!(
            try_short_circuit(Component::Structure, &a, &b),
            Some(Shortcut::Equal(Signal::Fingerprint))
        );
    }

    #[test]
    fn definition_path_mismatch_is_inconclusive() {
        for component in [
            Component::Structure,
            Component::Transform,
            Component::Meta,
            Component::VisConfig,
        ] {
            assert_eq!(
                try_short_circuit(component, &path("/ipfs/QmA"), &path("/ipfs/QmB")),
                None
            );
        }
    }

    #[test]
    fn payload_path_mismatch_is_reported() {
        assert_eq!(
            try_short_circuit(Component::Data, &path("/ipfs/QmA"), &path("/ipfs/QmB")),
            Some(Shortcut::NotEqual(Signal::Path))
        );
    }

    #[test]
    fn one_sided_signals_are_unusable() {
        let none = IdentitySignals::none();
        assert_eq!(
            try_short_circuit(Component::Data, &path("/ipfs/QmA"), &none),
            None
        );
        assert_eq!(
            try_short_circuit(Component::Structure, &fp("QmSum"), &none),
            None
        );
    }

    #[test]
    fn trivial_signals_never_match() {
        let root = path("/");
        assert_eq!(try_short_circuit(Component::Meta, &root, &root), None);
        assert_eq!(try_short_circuit(Component::Meta, &fp(""), &fp("")), None);
        assert_eq!(try_short_circuit(Component::Data, &root, &path("x")), None);
    }

    #[test]
    fn absent_signals_are_never_inequality() {
        let none = IdentitySignals::none();
        assert_eq!(try_short_circuit(Component::Data, &none, &none), None);
    }

    #[test]
    fn custom_min_length() {
        let gate = FastPathGate::new(1);
        let policy = GatePolicy::for_component(Component::Meta);
        assert_eq!(
            gate.check(policy, &path("/"), &path("/")),
            Some(Shortcut::Equal(Signal::Path))
        );
    }
}
