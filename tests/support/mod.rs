#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use uuid::Uuid;

use coursewiki::application::repos::{
    CreateWikiEntryParams, RepoError, UpdateWikiEntryParams, WikiRepo,
};
use coursewiki::domain::entities::WikiEntryRecord;

/// In-memory stand-in for the Postgres repository, with a counter on the
/// ordered listing fetch so tests can observe cache behavior.
#[derive(Default)]
pub struct MemoryWikiRepo {
    entries: Mutex<Vec<WikiEntryRecord>>,
    list_calls: AtomicUsize,
}

impl MemoryWikiRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, position: i32, is_html: bool, html: &str, is_draft: bool) -> Uuid {
        let now = OffsetDateTime::now_utc();
        let record = WikiEntryRecord {
            id: Uuid::new_v4(),
            position,
            is_html,
            html: html.to_string(),
            is_draft,
            created_at: now,
            updated_at: now,
        };
        let id = record.id;
        self.entries.lock().await.push(record);
        id
    }

    pub fn list_fetches(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn get(&self, id: Uuid) -> Option<WikiEntryRecord> {
        self.entries
            .lock()
            .await
            .iter()
            .find(|entry| entry.id == id)
            .cloned()
    }
}

#[async_trait]
impl WikiRepo for MemoryWikiRepo {
    async fn create_entry(
        &self,
        params: CreateWikiEntryParams,
    ) -> Result<WikiEntryRecord, RepoError> {
        let now = OffsetDateTime::now_utc();
        let record = WikiEntryRecord {
            id: Uuid::new_v4(),
            position: params.position,
            is_html: params.is_html,
            html: params.html,
            is_draft: params.is_draft,
            created_at: now,
            updated_at: now,
        };
        self.entries.lock().await.push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<WikiEntryRecord>, RepoError> {
        Ok(self.get(id).await)
    }

    async fn update_entry(
        &self,
        params: UpdateWikiEntryParams,
    ) -> Result<WikiEntryRecord, RepoError> {
        let mut entries = self.entries.lock().await;
        let Some(entry) = entries.iter_mut().find(|entry| entry.id == params.id) else {
            return Err(RepoError::NotFound);
        };
        entry.position = params.position;
        entry.is_html = params.is_html;
        entry.html = params.html;
        entry.is_draft = params.is_draft;
        entry.updated_at = OffsetDateTime::now_utc();
        Ok(entry.clone())
    }

    async fn delete_entry(&self, id: Uuid) -> Result<(), RepoError> {
        self.entries.lock().await.retain(|entry| entry.id != id);
        Ok(())
    }

    async fn list_ordered(&self, max_rows: u32) -> Result<Vec<WikiEntryRecord>, RepoError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let mut listing = self.entries.lock().await.clone();
        listing.sort_by(|a, b| {
            a.position
                .cmp(&b.position)
                .then(a.created_at.cmp(&b.created_at))
        });
        listing.truncate(max_rows as usize);
        Ok(listing)
    }

    async fn ping(&self) -> Result<(), RepoError> {
        Ok(())
    }
}
