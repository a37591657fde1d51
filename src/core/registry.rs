//! core::registry
//!
//! The transient set of unit identities processed during one closure
//! computation.
//!
//! # Design
//!
//! A [`LoadedSet`] is created by the caller of the top-level operation and
//! passed explicitly into every step. It is backed by a concurrent set so a
//! host can share one across initialization paths without extra locking.
//!
//! # Invariants
//!
//! - Entries are never removed
//! - Insertion is idempotent

use dashmap::DashSet;

use super::types::UnitIdentity;

/// Identities that have been fully processed.
#[derive(Debug, Default)]
pub struct LoadedSet {
    entries: DashSet<UnitIdentity>,
}

impl LoadedSet {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether an identity has been registered.
    pub fn contains(&self, identity: &str) -> bool {
        self.entries.contains(identity)
    }

    /// Register an identity.
    ///
    /// Returns `true` if the identity was not present before.
    pub fn insert(&self, identity: impl Into<UnitIdentity>) -> bool {
        self.entries.insert(identity.into())
    }

    /// Number of registered identities.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of the registered identities, sorted.
    pub fn identities(&self) -> Vec<UnitIdentity> {
        let mut ids: Vec<UnitIdentity> = self.entries.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn insert_is_idempotent() {
        let set = LoadedSet::new();
        assert!(set.insert("App"));
        assert!(!set.insert("App"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn contains_is_exact() {
        let set = LoadedSet::new();
        set.insert("Lib, Version=1.0.0");
        assert!(set.contains("Lib, Version=1.0.0"));
        assert!(!set.contains("Lib"));
    }

    #[test]
    fn identities_are_sorted() {
        let set = LoadedSet::new();
        set.insert("b");
        set.insert("a");
        set.insert("c");
        let ids: Vec<String> = set.identities().iter().map(|i| i.to_string()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn concurrent_inserts() {
        let set = Arc::new(LoadedSet::new());
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let set = Arc::clone(&set);
                thread::spawn(move || {
                    for i in 0..100 {
                        set.insert(format!("unit-{}", (i + t) % 100));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(set.len(), 100);
    }
}
