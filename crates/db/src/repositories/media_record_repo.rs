//! Repository for the `media_records` table.

use mediagen_core::types::DbId;
use sqlx::PgPool;

use crate::models::media_record::{CreateMediaRecord, MediaRecord};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, media_type, model, prompt, style, voice, file_path, result_url, created_at";

/// Provides create/list/lookup/delete operations for media records.
///
/// `media_type` values are validated by the caller (and backstopped by the
/// table's CHECK constraint); this layer is plain SQL.
pub struct MediaRecordRepo;

impl MediaRecordRepo {
    /// Insert a new media record, returning the full row with the
    /// server-assigned id and timestamp.
    pub async fn create(
        pool: &PgPool,
        input: &CreateMediaRecord,
    ) -> Result<MediaRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO media_records
                (media_type, model, prompt, style, voice, file_path, result_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MediaRecord>(&query)
            .bind(&input.media_type)
            .bind(&input.model)
            .bind(&input.prompt)
            .bind(&input.style)
            .bind(&input.voice)
            .bind(&input.file_path)
            .bind(&input.result_url)
            .fetch_one(pool)
            .await
    }

    /// Find a media record by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MediaRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM media_records WHERE id = $1");
        sqlx::query_as::<_, MediaRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List records, most recent first (`created_at DESC, id DESC`),
    /// optionally filtered by media type.
    pub async fn list(
        pool: &PgPool,
        media_type: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MediaRecord>, sqlx::Error> {
        match media_type {
            Some(media_type) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM media_records
                     WHERE media_type = $1
                     ORDER BY created_at DESC, id DESC
                     LIMIT $2 OFFSET $3"
                );
                sqlx::query_as::<_, MediaRecord>(&query)
                    .bind(media_type)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM media_records
                     ORDER BY created_at DESC, id DESC
                     LIMIT $1 OFFSET $2"
                );
                sqlx::query_as::<_, MediaRecord>(&query)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Total record count for the same filter `list` uses.
    pub async fn count(pool: &PgPool, media_type: Option<&str>) -> Result<i64, sqlx::Error> {
        match media_type {
            Some(media_type) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM media_records WHERE media_type = $1")
                    .bind(media_type)
                    .fetch_one(pool)
                    .await
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM media_records")
                    .fetch_one(pool)
                    .await
            }
        }
    }

    /// Delete a media record by ID. Returns `true` if a row was removed.
    /// Backing-file removal is the caller's responsibility and must happen
    /// before the row goes away.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM media_records WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
