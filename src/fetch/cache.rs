//! Per-build memo of fetched collections.
//!
//! Keyed by the full request (type, tier scope, parent). Only complete
//! collections are stored, so a strict caller never gets a collection that a
//! lenient caller assembled around a failed sub-fetch.

use super::{Collection, CollectionRequest};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct CollectionCache {
    entries: Mutex<FxHashMap<CollectionRequest, Arc<Collection>>>,
}

impl CollectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, request: &CollectionRequest) -> Option<Arc<Collection>> {
        self.entries.lock().get(request).cloned()
    }

    /// Store a collection; degraded collections are ignored.
    pub fn insert(&self, collection: Arc<Collection>) {
        if collection.is_complete() {
            self.entries
                .lock()
                .insert(collection.request().clone(), collection);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityKind;
    use crate::fetch::FetchError;
    use crate::fetch::collection::FetchWarning;
    use url::Url;

    #[test]
    fn test_cache_get_insert() {
        let cache = CollectionCache::new();
        let request = CollectionRequest::all(EntityKind::Loot);
        assert!(cache.get(&request).is_none());

        cache.insert(Arc::new(Collection::new(request.clone(), Vec::new(), Vec::new())));
        assert!(cache.get(&request).is_some());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_skips_degraded() {
        let cache = CollectionCache::new();
        let request = CollectionRequest::all(EntityKind::Adversaries);
        let warning = FetchWarning {
            tier: None,
            error: FetchError::Status {
                url: Url::parse("https://api.test/adversaries").unwrap(),
                status: 503,
            },
        };
        cache.insert(Arc::new(Collection::new(request.clone(), Vec::new(), vec![warning])));
        assert!(cache.get(&request).is_none());
        assert_eq!(cache.len(), 0);
    }
}
