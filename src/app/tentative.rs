//! Tentative ledger for optimistic updates.
//!
//! Before a change is applied locally, the pre-request value is recorded
//! under the entity key. The request outcome then either confirms the change
//! (the saved value is dropped) or reverts it (the saved value is handed
//! back). At most one change per key is outstanding at a time.

use std::collections::HashMap;
use std::hash::Hash;

/// Returned when a change is already outstanding for the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InFlight;

#[derive(Debug)]
pub struct Tentative<K, V> {
    saved: HashMap<K, V>,
}

impl<K: Eq + Hash, V> Default for Tentative<K, V> {
    fn default() -> Self {
        Self {
            saved: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash, V> Tentative<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `prior` for `key`. Fails without touching the ledger when a
    /// change for `key` is still outstanding.
    pub fn begin(&mut self, key: K, prior: V) -> Result<(), InFlight> {
        if self.saved.contains_key(&key) {
            return Err(InFlight);
        }
        self.saved.insert(key, prior);
        Ok(())
    }

    /// The server accepted the change; forget the saved value.
    pub fn confirm(&mut self, key: &K) -> bool {
        self.saved.remove(key).is_some()
    }

    /// The change failed; hand back the saved value for restoring.
    pub fn revert(&mut self, key: &K) -> Option<V> {
        self.saved.remove(key)
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.saved.contains_key(key)
    }

    /// Saved value for a pending key.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.saved.get_mut(key)
    }

    pub fn len(&self) -> usize {
        self.saved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }
}
