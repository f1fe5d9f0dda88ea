//! Process-wide listing cache with explicit delete-on-write invalidation.

use std::{collections::HashMap, sync::Arc};

use metrics::counter;
use tokio::sync::RwLock;

use crate::domain::entities::WikiEntryRecord;

/// Slot holding the full ordered wiki listing.
pub const WIKI_ENTRIES_SLOT: &str = "wiki:entries";

/// A cached listing is shared rather than copied out of the cache.
pub type CachedListing = Arc<Vec<WikiEntryRecord>>;

/// Best-effort named-slot cache.
///
/// A slot holds an entire ordered listing; writers delete the slot instead of
/// patching it, and the next read repopulates it from the store. An absent
/// slot and a miss are the same thing.
#[derive(Clone, Default)]
pub struct ListingCache {
    slots: Arc<RwLock<HashMap<String, CachedListing>>>,
}

impl ListingCache {
    pub fn new() -> Self {
        Self {
            slots: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn get(&self, slot: &str) -> Option<CachedListing> {
        let guard = self.slots.read().await;
        let hit = guard.get(slot).cloned();
        match hit {
            Some(_) => counter!("coursewiki_cache_hit_total").increment(1),
            None => counter!("coursewiki_cache_miss_total").increment(1),
        }
        hit
    }

    pub async fn put(&self, slot: impl Into<String>, listing: CachedListing) {
        let mut guard = self.slots.write().await;
        guard.insert(slot.into(), listing);
    }

    pub async fn invalidate(&self, slot: &str) {
        let mut guard = self.slots.write().await;
        guard.remove(slot);
        counter!("coursewiki_cache_invalidate_total").increment(1);
    }
}
