//! Single-fire subscriptions keyed by identity.

use std::collections::HashMap;
use std::hash::Hash;

/// Pending one-shot handlers keyed by `K`.
///
/// A value fires at most once: [`fire`](Self::fire) hands it out and forgets
/// it, and signals for keys without a pending value are ignored.
#[derive(Debug)]
pub struct OneShot<K, V> {
    pending: HashMap<K, V>,
}

impl<K: Eq + Hash, V> OneShot<K, V> {
    pub fn new() -> Self {
        Self {
            pending: HashMap::new(),
        }
    }

    /// Register `value` for `key`, returning any value it replaces.
    pub fn register(&mut self, key: K, value: V) -> Option<V> {
        self.pending.insert(key, value)
    }

    /// Take the value for `key`, if one is pending.
    pub fn fire(&mut self, key: &K) -> Option<V> {
        self.pending.remove(key)
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.pending.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<K: Eq + Hash, V> Default for OneShot<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
