mod behavior;

pub(crate) use behavior::Behavior;
pub(crate) use behavior::Produced;

use std::collections::{hash_map::Entry, HashMap};

use crate::Signature;

/// All behaviors configured for one signature.
///
/// Single-use behaviors are kept ahead of reusable ones so that a
/// queued one-shot answer is tried before a standing one.
#[derive(Debug)]
pub(crate) struct SignatureEntry {
    signature: Signature,
    behaviors: Vec<Behavior>,
}

/// What an upsert did to the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Upserted {
    Appended,
    Replaced,
}

impl SignatureEntry {
    fn new(signature: Signature) -> Self {
        SignatureEntry {
            signature,
            behaviors: vec![],
        }
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn behaviors(&self) -> &[Behavior] {
        &self.behaviors
    }

    pub(crate) fn behaviors_mut(&mut self) -> &mut Vec<Behavior> {
        &mut self.behaviors
    }

    fn insert(&mut self, behavior: Behavior) -> Upserted {
        let replaceable = if behavior.is_single_use() {
            None
        } else {
            self.behaviors
                .iter()
                .position(|b| !b.is_single_use() && b.state().same_as(behavior.state()))
        };

        let upserted = match replaceable {
            Some(index) => {
                self.behaviors[index] = behavior;
                Upserted::Replaced
            }
            None => {
                self.behaviors.push(behavior);
                Upserted::Appended
            }
        };

        // stable: keeps insertion order within each group
        self.behaviors.sort_by_key(|b| !b.is_single_use());
        upserted
    }

    /// One line per behavior: `<source> x <invocations>`.
    pub fn describe(&self) -> String {
        self.behaviors
            .iter()
            .map(|b| format!("  {}", b))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Behaviors of a mock, keyed by signature.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    entries: HashMap<Signature, SignatureEntry>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    /// Adds a behavior under `signature`.
    ///
    /// A reusable behavior replaces the reusable behavior with the
    /// exact same state, if any. Single-use behaviors are always
    /// appended.
    pub fn upsert(&mut self, signature: Signature, behavior: Behavior) -> Upserted {
        match self.entries.entry(signature) {
            Entry::Occupied(o) => o.into_mut().insert(behavior),
            Entry::Vacant(v) => {
                let mut entry = SignatureEntry::new(v.key().clone());
                let upserted = entry.insert(behavior);
                v.insert(entry);
                upserted
            }
        }
    }

    pub fn lookup(&self, signature: &Signature) -> Option<&SignatureEntry> {
        self.entries.get(signature)
    }

    pub(crate) fn lookup_mut(&mut self, signature: &Signature) -> Option<&mut SignatureEntry> {
        self.entries.get_mut(signature)
    }
}
