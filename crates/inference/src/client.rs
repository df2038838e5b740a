//! HTTP client for submitting generation jobs to remote services.
//!
//! Wraps a single [`reqwest::Client`]; the generation POST carries a
//! configurable timeout (generation can be slow), while result fetches use
//! the fixed timeout in [`crate::payload`].

use std::time::Duration;

use serde::Serialize;

use crate::error::InferenceError;
use crate::payload::{fetch_source, resolve_source, GenerationPayload};

/// Default timeout for the generation call itself.
pub const DEFAULT_GENERATE_TIMEOUT: Duration = Duration::from_secs(120);

/// Job body for an image generation request.
#[derive(Debug, Clone, Serialize)]
pub struct ImageJob<'a> {
    pub prompt: &'a str,
    pub style: &'a str,
}

/// Job body for an audio generation request.
#[derive(Debug, Clone, Serialize)]
pub struct AudioJob<'a> {
    pub prompt: &'a str,
    pub voice: &'a str,
}

/// Job body for a video generation request. The numeric parameters are
/// passed through to the service unmodified.
#[derive(Debug, Clone, Serialize)]
pub struct VideoJob<'a> {
    pub prompt: &'a str,
    pub num_frames: u32,
    pub fps: u32,
    pub num_inference_steps: u32,
    pub guidance_scale: f64,
    pub width: u32,
    pub height: u32,
}

/// Result of a generation call: the media bytes plus the original path or
/// URL they came from, when the service reported one (used to pick a file
/// extension for storage).
#[derive(Debug)]
pub struct GenerationOutput {
    pub bytes: Vec<u8>,
    pub source: Option<String>,
}

/// Client for all configured generation services.
pub struct InferenceClient {
    client: reqwest::Client,
    generate_timeout: Duration,
}

impl InferenceClient {
    pub fn new(generate_timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            generate_timeout,
        }
    }

    /// Submit a generation job and collect the result bytes.
    ///
    /// A JSON response is treated as a payload descriptor and chased down to
    /// the actual media via the normalizer; any other content type is the
    /// media itself. A single attempt — failures surface immediately.
    pub async fn generate<T: Serialize>(
        &self,
        endpoint_url: &str,
        job: &T,
    ) -> Result<GenerationOutput, InferenceError> {
        let response = self
            .client
            .post(endpoint_url)
            .json(job)
            .timeout(self.generate_timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(InferenceError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let is_json = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("json"));

        let body = response.bytes().await?;
        if !is_json {
            // The service replied with the media itself.
            return Ok(GenerationOutput {
                bytes: body.to_vec(),
                source: None,
            });
        }

        let payload: GenerationPayload = serde_json::from_slice(&body)
            .map_err(|e| InferenceError::Extraction(format!("unrecognized result shape: {e}")))?;
        let source = resolve_source(&payload)?;
        let bytes = fetch_source(&self.client, &source).await?;

        tracing::debug!(source = source.as_str(), size = bytes.len(), "Collected generation result");

        Ok(GenerationOutput {
            bytes,
            source: Some(source.as_str().to_string()),
        })
    }
}
