//! Domain entities mirrored from persistent storage.

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

/// A persisted wiki entry.
///
/// When `is_html` is false, `html` holds markup source that is rendered to
/// HTML on every read; the rendered form is never written back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WikiEntryRecord {
    pub id: Uuid,
    pub position: i32,
    pub is_html: bool,
    pub html: String,
    pub is_draft: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}
