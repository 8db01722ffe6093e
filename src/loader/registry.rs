//! Registry of active fakes.
//!
//! Fakes are keyed by the canonical identity of the module they replace.
//! Each registration stamps a fresh version suffix onto the identity it
//! hands back, so the host's identity-keyed module cache can never serve a
//! stale instance: a re-registered fake gets a new identity, a new load,
//! and fresh mock state.

use std::collections::HashMap;

/// Identity suffix marking a substituted module. The version counter is
/// appended directly after it.
pub const SIGNATURE: &str = "?__fake";

pub struct FakeEntry {
    /// Replacement source text served by the source hook.
    pub source: String,
    /// Versioned identity under which the current fake loads.
    pub signed_identity: String,
}

pub struct FakeRegistry {
    fakes: HashMap<String, FakeEntry>,
    sequence: u64,
}

impl FakeRegistry {
    pub fn new() -> Self {
        FakeRegistry {
            fakes: HashMap::new(),
            sequence: 0,
        }
    }

    /// Registers (or replaces) the fake for a canonical identity and
    /// returns the fresh signed identity. The counter is strictly
    /// monotone across the registry's lifetime, including replacements
    /// and unload/re-register cycles.
    pub fn register(&mut self, canonical: impl Into<String>, source: impl Into<String>) -> String {
        self.sequence += 1;
        let canonical = canonical.into();
        let signed_identity = format!("{}{}{}", canonical, SIGNATURE, self.sequence);
        self.fakes.insert(
            canonical,
            FakeEntry {
                source: source.into(),
                signed_identity: signed_identity.clone(),
            },
        );
        signed_identity
    }

    /// Removes a registration. Returns whether one existed.
    pub fn unload(&mut self, canonical: &str) -> bool {
        self.fakes.remove(canonical).is_some()
    }

    pub fn get(&self, canonical: &str) -> Option<&FakeEntry> {
        self.fakes.get(canonical)
    }

    pub fn contains(&self, canonical: &str) -> bool {
        self.fakes.contains_key(canonical)
    }

    pub fn len(&self) -> usize {
        self.fakes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fakes.is_empty()
    }

    /// Strips a version signature: the text before the first `?__fake`.
    pub fn strip_signature(identity: &str) -> &str {
        match identity.find(SIGNATURE) {
            Some(pos) => &identity[..pos],
            None => identity,
        }
    }
}

impl Default for FakeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
