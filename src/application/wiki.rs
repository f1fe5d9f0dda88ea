//! Wiki entry orchestration: cached listing, bootstrap, and write paths.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::application::render::render_markup;
use crate::application::repos::{
    CreateWikiEntryParams, RepoError, UpdateWikiEntryParams, WikiRepo,
};
use crate::cache::{CachedListing, ListingCache, WIKI_ENTRIES_SLOT};
use crate::domain::entities::WikiEntryRecord;
use crate::domain::rights::{ViewerContext, apply_rights};
use crate::domain::samples;

/// Upper bound on rows pulled by the ordered listing fetch.
const LISTING_FETCH_LIMIT: u32 = 1000;

/// A listing entry with its body resolved to display HTML.
#[derive(Debug, Clone, PartialEq)]
pub struct ListedEntry {
    pub record: WikiEntryRecord,
    /// The stored HTML, or the markup rendered at read time.
    pub body_html: String,
}

#[derive(Clone)]
pub struct WikiService {
    repo: Arc<dyn WikiRepo>,
    cache: ListingCache,
}

impl WikiService {
    pub fn new(repo: Arc<dyn WikiRepo>, cache: ListingCache) -> Self {
        Self { repo, cache }
    }

    /// Read-through listing fetch.
    ///
    /// Serves the cache slot when allowed and present; otherwise pulls the
    /// ordered listing from the store and repopulates the slot. The cached
    /// value is returned as-is, without re-sorting or re-validation.
    pub async fn entries(&self, allow_cached: bool) -> Result<CachedListing, RepoError> {
        if allow_cached {
            if let Some(listing) = self.cache.get(WIKI_ENTRIES_SLOT).await {
                return Ok(listing);
            }
        }

        let listing: CachedListing = Arc::new(self.repo.list_ordered(LISTING_FETCH_LIMIT).await?);
        self.cache.put(WIKI_ENTRIES_SLOT, listing.clone()).await;
        Ok(listing)
    }

    /// The listing one viewer is allowed to see, bodies resolved for display.
    ///
    /// An editor opening an empty wiki triggers the one-time sample
    /// bootstrap; the listing is then re-read through the regular cache path.
    pub async fn list_for_viewer(
        &self,
        viewer: &ViewerContext,
    ) -> Result<Vec<ListedEntry>, RepoError> {
        let mut listing = self.entries(true).await?;
        if listing.is_empty() && viewer.can_edit() {
            self.bootstrap_samples().await?;
            listing = self.entries(true).await?;
        }

        let visible = apply_rights(viewer, listing.as_ref().clone());
        Ok(visible
            .into_iter()
            .map(|record| {
                let body_html = if record.is_html {
                    record.html.clone()
                } else {
                    render_markup(&record.html)
                };
                ListedEntry { record, body_html }
            })
            .collect())
    }

    /// Create an entry with the documented add-defaults.
    pub async fn create_default(&self) -> Result<WikiEntryRecord, RepoError> {
        self.create(CreateWikiEntryParams::default()).await
    }

    pub async fn create(
        &self,
        params: CreateWikiEntryParams,
    ) -> Result<WikiEntryRecord, RepoError> {
        let record = self.repo.create_entry(params).await?;
        self.cache.invalidate(WIKI_ENTRIES_SLOT).await;
        Ok(record)
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<WikiEntryRecord>, RepoError> {
        self.repo.find_by_id(id).await
    }

    /// Full overwrite of the editable fields.
    pub async fn update(
        &self,
        params: UpdateWikiEntryParams,
    ) -> Result<WikiEntryRecord, RepoError> {
        let record = self.repo.update_entry(params).await?;
        self.cache.invalidate(WIKI_ENTRIES_SLOT).await;
        Ok(record)
    }

    /// Delete by key. A missing key deletes nothing and is not an error; the
    /// listing slot is dropped either way.
    pub async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.repo.delete_entry(id).await?;
        self.cache.invalidate(WIKI_ENTRIES_SLOT).await;
        Ok(())
    }

    pub async fn ping_store(&self) -> Result<(), RepoError> {
        self.repo.ping().await
    }

    async fn bootstrap_samples(&self) -> Result<(), RepoError> {
        for sample in samples::SAMPLE_ENTRIES {
            self.create(CreateWikiEntryParams {
                position: sample.position,
                is_html: sample.is_html,
                html: sample.html.to_string(),
                is_draft: sample.is_draft,
            })
            .await?;
        }
        info!(
            target: "coursewiki::wiki",
            count = samples::SAMPLE_ENTRIES.len(),
            "seeded sample wiki entries"
        );
        Ok(())
    }
}
