//! Generation proxy handlers: validate the request, call the remote
//! service, store the result, and create the catalog record.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use mediagen_core::media::MediaType;
use mediagen_core::naming;
use mediagen_db::models::media_record::CreateMediaRecord;
use mediagen_db::repositories::MediaRecordRepo;
use mediagen_inference::client::{AudioJob, GenerationOutput, ImageJob, VideoJob};
use mediagen_inference::InferenceError;

use crate::error::{AppError, AppResult};
use crate::handlers::parse_json;
use crate::response::{RecordPayload, RecordResponse};
use crate::state::AppState;

// Video parameter defaults, passed through to the remote service unmodified.
const DEFAULT_NUM_FRAMES: u32 = 16;
const DEFAULT_FPS: u32 = 8;
const DEFAULT_INFERENCE_STEPS: u32 = 25;
const DEFAULT_GUIDANCE_SCALE: f64 = 7.5;
const DEFAULT_FRAME_WIDTH: u32 = 512;
const DEFAULT_FRAME_HEIGHT: u32 = 512;

/// Shown instead of the raw "ftfy" failure from the video service; the raw
/// message is too obscure to act on.
const FTFY_REMEDIATION: &str = "The video service is missing the 'ftfy' Python package. \
    Install it on the inference host (pip install ftfy) and retry.";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ImageGenerationRequest {
    #[serde(default)]
    pub prompt: String,
    pub model: Option<String>,
    #[serde(default)]
    pub style: String,
}

#[derive(Debug, Deserialize)]
pub struct AudioGenerationRequest {
    #[serde(default)]
    pub prompt: String,
    pub model: Option<String>,
    #[serde(default)]
    pub voice: String,
}

#[derive(Debug, Deserialize)]
pub struct VideoGenerationRequest {
    #[serde(default)]
    pub prompt: String,
    pub model: Option<String>,
    pub num_frames: Option<u32>,
    pub fps: Option<u32>,
    pub num_inference_steps: Option<u32>,
    pub guidance_scale: Option<f64>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Trim and validate the prompt; generation never proceeds without one.
fn require_prompt(prompt: &str) -> AppResult<&str> {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest("prompt must not be empty".into()));
    }
    Ok(trimmed)
}

/// Resolve the model to use: the request's value when present, else the
/// first configured service for this media type.
fn resolve_model(
    state: &AppState,
    media_type: MediaType,
    requested: Option<&str>,
) -> AppResult<String> {
    match requested.map(str::trim).filter(|m| !m.is_empty()) {
        Some(model) => Ok(model.to_string()),
        None => state
            .registry
            .default_model(media_type)
            .map(str::to_string)
            .ok_or_else(|| {
                AppError::UnsupportedModel(format!(
                    "no {media_type} generation services are configured"
                ))
            }),
    }
}

/// Rewrite the known "ftfy" dependency failure from the video service into
/// an actionable message; everything else converts as usual.
fn video_upstream_error(err: InferenceError) -> AppError {
    match AppError::from(err) {
        AppError::Upstream(detail) if detail.contains("ftfy") => {
            AppError::Upstream(FTFY_REMEDIATION.to_string())
        }
        other => other,
    }
}

/// Store generation output and create its catalog record.
async fn persist_output(
    state: &AppState,
    media_type: MediaType,
    model: String,
    prompt: String,
    style: String,
    voice: String,
    output: GenerationOutput,
) -> AppResult<RecordPayload> {
    let ext = naming::extension_for(output.source.as_deref(), media_type);
    let filename = naming::generated_filename(media_type, &ext);
    let rel = format!("outputs/{filename}");

    state.storage.save(&rel, &output.bytes).await?;

    let record = MediaRecordRepo::create(
        &state.pool,
        &CreateMediaRecord {
            media_type: media_type.name().to_string(),
            model,
            prompt,
            style,
            voice,
            file_path: Some(rel),
            result_url: String::new(),
        },
    )
    .await?;

    tracing::info!(
        record_id = record.id,
        media_type = %record.media_type,
        model = %record.model,
        "Generation result stored",
    );

    Ok(RecordPayload::from_record(record, &state.storage))
}

// ---------------------------------------------------------------------------
// POST /api/image/
// ---------------------------------------------------------------------------

/// Generate an image from a prompt.
pub async fn generate_image(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let input: ImageGenerationRequest = parse_json(&body)?;
    let prompt = require_prompt(&input.prompt)?.to_string();
    let model = resolve_model(&state, MediaType::Image, input.model.as_deref())?;
    let endpoint = state.registry.resolve(MediaType::Image, &model)?.url.clone();

    let job = ImageJob {
        prompt: &prompt,
        style: &input.style,
    };
    let output = state.inference.generate(&endpoint, &job).await?;

    let record = persist_output(
        &state,
        MediaType::Image,
        model,
        prompt,
        input.style,
        String::new(),
        output,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(RecordResponse { record })))
}

// ---------------------------------------------------------------------------
// POST /api/audio/
// ---------------------------------------------------------------------------

/// Generate audio from a prompt.
pub async fn generate_audio(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let input: AudioGenerationRequest = parse_json(&body)?;
    let prompt = require_prompt(&input.prompt)?.to_string();
    let model = resolve_model(&state, MediaType::Audio, input.model.as_deref())?;
    let endpoint = state.registry.resolve(MediaType::Audio, &model)?.url.clone();

    let job = AudioJob {
        prompt: &prompt,
        voice: &input.voice,
    };
    let output = state.inference.generate(&endpoint, &job).await?;

    let record = persist_output(
        &state,
        MediaType::Audio,
        model,
        prompt,
        String::new(),
        input.voice,
        output,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(RecordResponse { record })))
}

// ---------------------------------------------------------------------------
// POST /api/video/
// ---------------------------------------------------------------------------

/// Generate a video from a prompt. Numeric sampling parameters default to
/// the documented values and pass through to the service unmodified.
pub async fn generate_video(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let input: VideoGenerationRequest = parse_json(&body)?;
    let prompt = require_prompt(&input.prompt)?.to_string();
    let model = resolve_model(&state, MediaType::Video, input.model.as_deref())?;
    let endpoint = state.registry.resolve(MediaType::Video, &model)?.url.clone();

    let job = VideoJob {
        prompt: &prompt,
        num_frames: input.num_frames.unwrap_or(DEFAULT_NUM_FRAMES),
        fps: input.fps.unwrap_or(DEFAULT_FPS),
        num_inference_steps: input.num_inference_steps.unwrap_or(DEFAULT_INFERENCE_STEPS),
        guidance_scale: input.guidance_scale.unwrap_or(DEFAULT_GUIDANCE_SCALE),
        width: input.width.unwrap_or(DEFAULT_FRAME_WIDTH),
        height: input.height.unwrap_or(DEFAULT_FRAME_HEIGHT),
    };
    let output = state
        .inference
        .generate(&endpoint, &job)
        .await
        .map_err(video_upstream_error)?;

    let record = persist_output(
        &state,
        MediaType::Video,
        model,
        prompt,
        String::new(),
        String::new(),
        output,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(RecordResponse { record })))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn prompt_is_trimmed() {
        assert_eq!(require_prompt("  a cat  ").unwrap(), "a cat");
    }

    #[test]
    fn empty_prompt_is_rejected() {
        assert_matches!(require_prompt(""), Err(AppError::BadRequest(_)));
        assert_matches!(require_prompt("   \n\t"), Err(AppError::BadRequest(_)));
    }

    #[test]
    fn ftfy_failure_is_rewritten() {
        let err = InferenceError::Api {
            status: 500,
            body: "ModuleNotFoundError: No module named 'ftfy'".to_string(),
        };
        assert_matches!(
            video_upstream_error(err),
            AppError::Upstream(detail) if detail == FTFY_REMEDIATION
        );
    }

    #[test]
    fn other_upstream_failures_pass_through() {
        let err = InferenceError::Api {
            status: 503,
            body: "overloaded".to_string(),
        };
        assert_matches!(
            video_upstream_error(err),
            AppError::Upstream(detail) if detail.contains("overloaded")
        );
    }

    #[test]
    fn unsupported_model_is_not_rewritten() {
        let err = InferenceError::UnsupportedModel {
            media_type: MediaType::Video,
            model: "ftfy".to_string(),
        };
        assert_matches!(video_upstream_error(err), AppError::UnsupportedModel(_));
    }
}
