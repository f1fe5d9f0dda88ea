//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::WikiEntryRecord;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct CreateWikiEntryParams {
    pub position: i32,
    pub is_html: bool,
    pub html: String,
    pub is_draft: bool,
}

impl Default for CreateWikiEntryParams {
    /// Defaults applied by the add operation: a draft HTML placeholder at the
    /// top of the list.
    fn default() -> Self {
        Self {
            position: 1,
            is_html: true,
            html: String::from("Here is my wiki entry!"),
            is_draft: true,
        }
    }
}

/// Full overwrite of the editable fields of one entry.
#[derive(Debug, Clone)]
pub struct UpdateWikiEntryParams {
    pub id: Uuid,
    pub position: i32,
    pub is_html: bool,
    pub html: String,
    pub is_draft: bool,
}

#[async_trait]
pub trait WikiRepo: Send + Sync {
    async fn create_entry(&self, params: CreateWikiEntryParams)
    -> Result<WikiEntryRecord, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<WikiEntryRecord>, RepoError>;

    /// Overwrites the editable fields; `RepoError::NotFound` if the entry is
    /// gone.
    async fn update_entry(&self, params: UpdateWikiEntryParams)
    -> Result<WikiEntryRecord, RepoError>;

    /// Deleting an absent entry is not an error.
    async fn delete_entry(&self, id: Uuid) -> Result<(), RepoError>;

    /// Ordered range fetch: ascending `position`, at most `max_rows` rows.
    async fn list_ordered(&self, max_rows: u32) -> Result<Vec<WikiEntryRecord>, RepoError>;

    /// Cheap liveness probe for the health endpoint.
    async fn ping(&self) -> Result<(), RepoError>;
}
