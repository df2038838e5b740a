//! Handlers for the `/api/records` resource: listing, manual creation,
//! deletion, single download, and batch zip download.

use axum::body::{Body, Bytes};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use indexmap::IndexMap;
use serde::Deserialize;
use tokio_util::io::ReaderStream;

use mediagen_core::error::CoreError;
use mediagen_core::media::MediaType;
use mediagen_core::pagination::{clamp_page, clamp_page_size, offset};
use mediagen_core::types::DbId;
use mediagen_db::models::media_record::{CreateMediaRecord, MediaRecord};
use mediagen_db::repositories::MediaRecordRepo;

use crate::archive::build_archive;
use crate::error::{AppError, AppResult};
use crate::handlers::parse_json;
use crate::response::{RecordListResponse, RecordPayload, RecordResponse};
use crate::state::AppState;

/// Attachment name for batch downloads.
const BATCH_ARCHIVE_NAME: &str = "media_batch.zip";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ListRecordsQuery {
    pub media_type: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// Body for `POST /api/records/create/` — a manual record whose output is
/// hosted externally.
#[derive(Debug, Deserialize)]
pub struct CreateRecordRequest {
    pub media_type: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub voice: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct BatchDownloadRequest {
    #[serde(default)]
    pub ids: Vec<DbId>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a record or fail with 404.
async fn ensure_record_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<MediaRecord> {
    MediaRecordRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MediaRecord",
            id,
        }))
}

/// Last path segment of a logical storage path.
fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Guess a Content-Type from a file extension.
fn content_type_for_extension(path: &str) -> &'static str {
    let ext = path.rsplit('.').next().unwrap_or("").to_lowercase();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "mp4" | "m4v" => "video/mp4",
        "webm" => "video/webm",
        _ => "application/octet-stream",
    }
}

// ---------------------------------------------------------------------------
// GET /api/records/
// ---------------------------------------------------------------------------

/// List records, most recent first, with optional media-type filter and
/// clamped pagination.
pub async fn list_records(
    State(state): State<AppState>,
    Query(params): Query<ListRecordsQuery>,
) -> AppResult<impl IntoResponse> {
    let filter = match params.media_type.as_deref() {
        Some(raw) if !raw.is_empty() => Some(MediaType::from_name(raw)?),
        _ => None,
    };
    let page = clamp_page(params.page);
    let page_size = clamp_page_size(params.page_size);

    let filter_name = filter.map(MediaType::name);
    let records =
        MediaRecordRepo::list(&state.pool, filter_name, page_size, offset(page, page_size))
            .await?;
    let total = MediaRecordRepo::count(&state.pool, filter_name).await?;

    let records = records
        .into_iter()
        .map(|r| RecordPayload::from_record(r, &state.storage))
        .collect();

    Ok(Json(RecordListResponse {
        records,
        page,
        page_size,
        total,
    }))
}

// ---------------------------------------------------------------------------
// POST /api/records/create/
// ---------------------------------------------------------------------------

/// Create a record for externally-hosted output (no local file).
pub async fn create_record(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let input: CreateRecordRequest = parse_json(&body)?;
    let media_type = MediaType::from_name(&input.media_type)?;

    let record = MediaRecordRepo::create(
        &state.pool,
        &CreateMediaRecord {
            media_type: media_type.name().to_string(),
            model: input.model,
            prompt: input.prompt,
            style: input.style,
            voice: input.voice,
            file_path: None,
            result_url: input.url,
        },
    )
    .await?;

    tracing::info!(
        record_id = record.id,
        media_type = %record.media_type,
        "Media record created",
    );

    let record = RecordPayload::from_record(record, &state.storage);
    Ok((StatusCode::CREATED, Json(RecordResponse { record })))
}

// ---------------------------------------------------------------------------
// POST /api/records/{id}/delete/
// ---------------------------------------------------------------------------

/// Delete a record and its backing file.
pub async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let record = ensure_record_exists(&state.pool, id).await?;

    // The file goes first so a failed unlink keeps the row visible.
    if let Some(path) = &record.file_path {
        if state.storage.exists(path).await {
            state.storage.delete(path).await?;
        }
    }

    MediaRecordRepo::delete(&state.pool, id).await?;

    tracing::info!(record_id = id, "Media record deleted");

    Ok(Json(serde_json::json!({ "ok": true })))
}

// ---------------------------------------------------------------------------
// GET /api/records/{id}/download/
// ---------------------------------------------------------------------------

/// Download a record's stored file as an attachment, or redirect to its
/// external result URL when nothing is stored locally.
pub async fn download_record(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let record = ensure_record_exists(&state.pool, id).await?;

    if let Some(path) = &record.file_path {
        if state.storage.exists(path).await {
            let absolute = state.storage.absolute(path);
            let file = tokio::fs::File::open(&absolute)
                .await
                .map_err(|e| AppError::Internal(e.to_string()))?;
            let file_size = file
                .metadata()
                .await
                .map_err(|e| AppError::Internal(e.to_string()))?
                .len();
            let stream = ReaderStream::new(file);
            let filename = base_name(path);

            return Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, content_type_for_extension(path))
                .header(header::CONTENT_LENGTH, file_size.to_string())
                .header(
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{filename}\""),
                )
                .body(Body::from_stream(stream))
                .map_err(|e| AppError::Internal(e.to_string()));
        }
    }

    if !record.result_url.is_empty() {
        return Ok(Redirect::temporary(&record.result_url).into_response());
    }

    Err(AppError::Core(CoreError::NotFound {
        entity: "MediaFile",
        id,
    }))
}

// ---------------------------------------------------------------------------
// POST /api/records/download/
// ---------------------------------------------------------------------------

/// Bundle the stored files of the requested records into a single zip.
///
/// Records without a backing file, or whose file is gone on disk, are
/// skipped silently; only a fully empty result is an error.
pub async fn download_batch(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Response> {
    let input: BatchDownloadRequest = parse_json(&body)?;
    if input.ids.is_empty() {
        return Err(AppError::BadRequest("ids must be a non-empty list".into()));
    }

    let mut entries: IndexMap<String, Vec<u8>> = IndexMap::new();
    for &id in &input.ids {
        let Some(record) = MediaRecordRepo::find_by_id(&state.pool, id).await? else {
            continue;
        };
        let Some(path) = record.file_path else {
            continue;
        };
        match tokio::fs::read(state.storage.absolute(&path)).await {
            Ok(bytes) => {
                // Same-named files from different records collapse; the
                // last one requested wins.
                entries.insert(base_name(&path).to_string(), bytes);
            }
            Err(err) => {
                tracing::warn!(
                    record_id = id,
                    path = %path,
                    error = %err,
                    "Skipping unreadable file in batch download",
                );
            }
        }
    }

    if entries.is_empty() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "MediaFile",
            id: 0,
        }));
    }

    let archive = build_archive(&entries)
        .map_err(|e| AppError::Internal(format!("zip assembly failed: {e}")))?;

    tracing::info!(
        requested = input.ids.len(),
        bundled = entries.len(),
        bytes = archive.len(),
        "Batch download archive built",
    );

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/zip")
        .header(header::CONTENT_LENGTH, archive.len().to_string())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{BATCH_ARCHIVE_NAME}\""),
        )
        .body(Body::from(archive))
        .map_err(|e| AppError::Internal(e.to_string()))
}
