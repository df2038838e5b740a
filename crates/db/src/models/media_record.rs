//! Media record entity model and DTOs.

use mediagen_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `media_records` table.
///
/// Rows are immutable after creation except for deletion. `file_path` is the
/// logical storage path of a locally stored blob; `result_url` is the
/// external fallback for records whose output is hosted elsewhere.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MediaRecord {
    pub id: DbId,
    pub media_type: String,
    pub model: String,
    pub prompt: String,
    pub style: String,
    pub voice: String,
    pub file_path: Option<String>,
    pub result_url: String,
    pub created_at: Timestamp,
}

/// DTO for inserting a media record.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMediaRecord {
    pub media_type: String,
    pub model: String,
    pub prompt: String,
    pub style: String,
    pub voice: String,
    pub file_path: Option<String>,
    pub result_url: String,
}
