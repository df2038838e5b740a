//! Response payload types shared by record and generation handlers.
//!
//! Use these typed envelopes instead of ad-hoc `serde_json::json!` so the
//! wire shapes stay consistent across handlers.

use mediagen_core::storage::MediaStorage;
use mediagen_core::types::{DbId, Timestamp};
use mediagen_db::models::media_record::MediaRecord;
use serde::Serialize;

/// A media record as serialized to clients, with the derived `url`.
#[derive(Debug, Serialize)]
pub struct RecordPayload {
    pub id: DbId,
    pub media_type: String,
    pub model: String,
    pub prompt: String,
    pub style: String,
    pub voice: String,
    pub url: String,
    pub created_at: Timestamp,
}

impl RecordPayload {
    /// Build the client view of a record. A locally stored file takes
    /// precedence over the external result URL.
    pub fn from_record(record: MediaRecord, storage: &MediaStorage) -> Self {
        let url = match &record.file_path {
            Some(path) => storage.url_for(path),
            None => record.result_url.clone(),
        };
        Self {
            id: record.id,
            media_type: record.media_type,
            model: record.model,
            prompt: record.prompt,
            style: record.style,
            voice: record.voice,
            url,
            created_at: record.created_at,
        }
    }
}

/// `{ "record": ... }` envelope for create and generation responses.
#[derive(Debug, Serialize)]
pub struct RecordResponse {
    pub record: RecordPayload,
}

/// Page envelope for `GET /api/records/`.
#[derive(Debug, Serialize)]
pub struct RecordListResponse {
    pub records: Vec<RecordPayload>,
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
}
