//! Registry of sites built from each definition.
//!
//! The registry is an explicit object owned by whatever bootstraps the
//! [`SiteDefinition`](crate::SiteDefinition)s, rather than process-wide state.
//! Tests create a fresh registry each; long-lived hosts call
//! [`SiteRegistry::clear`] on teardown.
//!
//! # Thread Safety
//!
//! Entries live behind an `RwLock`, so definitions sharing a registry may
//! create sites from several threads at once. The lock is never held while
//! user callbacks run.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::site::Site;

/// Identity of a definition within its registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DefinitionKey(u64);

impl fmt::Display for DefinitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Append-only mapping from definition to the sites built from it, in
/// creation order.
#[derive(Debug, Default)]
pub struct SiteRegistry {
    next_key: AtomicU64,
    entries: RwLock<HashMap<DefinitionKey, Vec<Arc<Site>>>>,
}

impl SiteRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a key for a new definition.
    pub(crate) fn allocate_key(&self) -> DefinitionKey {
        DefinitionKey(self.next_key.fetch_add(1, Ordering::Relaxed))
    }

    /// Append a site to a definition's entry.
    pub(crate) fn register(&self, key: DefinitionKey, site: Arc<Site>) {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        entries.entry(key).or_default().push(site);
    }

    /// Snapshot of the sites registered under `key`, oldest first.
    ///
    /// A key that never registered a site yields an empty list.
    #[must_use]
    pub fn sites(&self, key: DefinitionKey) -> Vec<Arc<Site>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned()
            .unwrap_or_default()
    }

    /// Total number of registered sites across all definitions.
    #[must_use]
    pub fn site_count(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(Vec::len)
            .sum()
    }

    /// Number of definitions with at least one registered site.
    #[must_use]
    pub fn definition_count(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Drop every entry. Keys already handed out stay valid and start empty.
    pub fn clear(&self) {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let dropped: usize = entries.values().map(Vec::len).sum();
        entries.clear();
        tracing::debug!(dropped, "Site registry cleared");
    }
}

#[cfg(test)]
mod tests {
    static_assertions::assert_impl_all!(super::SiteRegistry: Send, Sync);

    use super::*;

    #[test]
    fn test_unknown_key_has_no_sites() {
        let registry = SiteRegistry::new();
        let key = registry.allocate_key();

        assert!(registry.sites(key).is_empty());
        assert_eq!(registry.definition_count(), 0);
    }

    #[test]
    fn test_allocate_key_is_unique() {
        let registry = SiteRegistry::new();

        let a = registry.allocate_key();
        let b = registry.allocate_key();

        assert_ne!(a, b);
    }

    #[test]
    fn test_register_preserves_order_per_key() {
        let registry = SiteRegistry::new();
        let a = registry.allocate_key();
        let b = registry.allocate_key();

        registry.register(a, Arc::new(Site::new("a1")));
        registry.register(b, Arc::new(Site::new("b1")));
        registry.register(a, Arc::new(Site::new("a2")));

        let ids: Vec<_> = registry
            .sites(a)
            .iter()
            .map(|s| s.id().to_owned())
            .collect();
        assert_eq!(ids, vec!["a1", "a2"]);
        assert_eq!(registry.sites(b).len(), 1);
        assert_eq!(registry.site_count(), 3);
        assert_eq!(registry.definition_count(), 2);
    }

    #[test]
    fn test_sites_returns_snapshot() {
        let registry = SiteRegistry::new();
        let key = registry.allocate_key();
        registry.register(key, Arc::new(Site::new("first")));

        let snapshot = registry.sites(key);
        registry.register(key, Arc::new(Site::new("second")));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(registry.sites(key).len(), 2);
    }

    #[test]
    fn test_clear_drops_entries() {
        let registry = SiteRegistry::new();
        let key = registry.allocate_key();
        registry.register(key, Arc::new(Site::new("s")));

        registry.clear();

        assert!(registry.sites(key).is_empty());
        assert_eq!(registry.site_count(), 0);
    }

    #[test]
    fn test_display_key() {
        let registry = SiteRegistry::new();
        assert_eq!(registry.allocate_key().to_string(), "#0");
    }
}
