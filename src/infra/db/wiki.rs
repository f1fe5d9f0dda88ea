use async_trait::async_trait;
use sqlx::query;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    application::repos::{CreateWikiEntryParams, RepoError, UpdateWikiEntryParams, WikiRepo},
    domain::entities::WikiEntryRecord,
};

use super::{PostgresRepositories, map_sqlx_error};

const ENTRY_COLUMNS: &str = "id, position, is_html, html, is_draft, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct WikiEntryRow {
    id: Uuid,
    position: i32,
    is_html: bool,
    html: String,
    is_draft: bool,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<WikiEntryRow> for WikiEntryRecord {
    fn from(row: WikiEntryRow) -> Self {
        Self {
            id: row.id,
            position: row.position,
            is_html: row.is_html,
            html: row.html,
            is_draft: row.is_draft,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl WikiRepo for PostgresRepositories {
    async fn create_entry(
        &self,
        params: CreateWikiEntryParams,
    ) -> Result<WikiEntryRecord, RepoError> {
        let CreateWikiEntryParams {
            position,
            is_html,
            html,
            is_draft,
        } = params;

        let id = Uuid::new_v4();
        let now = OffsetDateTime::now_utc();

        let sql = format!(
            "INSERT INTO wiki_entries ({ENTRY_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $6) \
             RETURNING {ENTRY_COLUMNS}"
        );
        let row = sqlx::query_as::<_, WikiEntryRow>(&sql)
            .bind(id)
            .bind(position)
            .bind(is_html)
            .bind(&html)
            .bind(is_draft)
            .bind(now)
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<WikiEntryRecord>, RepoError> {
        let sql = format!("SELECT {ENTRY_COLUMNS} FROM wiki_entries WHERE id = $1");
        let row = sqlx::query_as::<_, WikiEntryRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(WikiEntryRecord::from))
    }

    async fn update_entry(
        &self,
        params: UpdateWikiEntryParams,
    ) -> Result<WikiEntryRecord, RepoError> {
        let UpdateWikiEntryParams {
            id,
            position,
            is_html,
            html,
            is_draft,
        } = params;

        let now = OffsetDateTime::now_utc();

        let sql = format!(
            "UPDATE wiki_entries \
             SET position = $2, is_html = $3, html = $4, is_draft = $5, updated_at = $6 \
             WHERE id = $1 \
             RETURNING {ENTRY_COLUMNS}"
        );
        let row = sqlx::query_as::<_, WikiEntryRow>(&sql)
            .bind(id)
            .bind(position)
            .bind(is_html)
            .bind(&html)
            .bind(is_draft)
            .bind(now)
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        row.map(WikiEntryRecord::from).ok_or(RepoError::NotFound)
    }

    async fn delete_entry(&self, id: Uuid) -> Result<(), RepoError> {
        query("DELETE FROM wiki_entries WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn list_ordered(&self, max_rows: u32) -> Result<Vec<WikiEntryRecord>, RepoError> {
        let sql = format!(
            "SELECT {ENTRY_COLUMNS} FROM wiki_entries \
             ORDER BY position ASC, created_at ASC \
             LIMIT $1"
        );
        let rows = sqlx::query_as::<_, WikiEntryRow>(&sql)
            .bind(i64::from(max_rows))
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(WikiEntryRecord::from).collect())
    }

    async fn ping(&self) -> Result<(), RepoError> {
        query("SELECT 1")
            .execute(self.pool())
            .await
            .map(|_| ())
            .map_err(map_sqlx_error)
    }
}
