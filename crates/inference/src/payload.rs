//! Normalizes the loosely-shaped result payloads generation services return.
//!
//! Services report their output as a bare string (path or URL), a list whose
//! first element holds the result, or an object keyed by one of a handful of
//! conventional names. [`resolve_source`] walks any of those shapes down to
//! the single path/URL that holds the media; [`fetch_source`] then loads the
//! actual bytes.

use std::time::Duration;

use serde::Deserialize;

use crate::error::InferenceError;

/// Key probe order for object-shaped payloads. The first key present wins;
/// the order is part of the contract with the services, do not reorder.
const SOURCE_KEYS: &[&str] = &["name", "path", "url", "video", "file", "filepath", "image"];

/// Timeout for fetching a result over HTTP. The generation call itself has
/// its own (longer, configurable) timeout.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(60);

/// A result payload as deserialized from a service's JSON response.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GenerationPayload {
    /// A bare path or URL.
    Text(String),
    /// An ordered list; only the first element is meaningful.
    List(Vec<GenerationPayload>),
    /// An object keyed by one of [`SOURCE_KEYS`].
    Map(serde_json::Map<String, serde_json::Value>),
}

/// Where the generated media actually lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadSource {
    /// An HTTP(S) URL to fetch.
    Url(String),
    /// A path on the local filesystem (shared volume with the service).
    LocalPath(String),
}

impl PayloadSource {
    /// The original path or URL string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Url(s) | Self::LocalPath(s) => s,
        }
    }
}

/// Walk a payload down to the path or URL holding the media.
pub fn resolve_source(payload: &GenerationPayload) -> Result<PayloadSource, InferenceError> {
    match payload {
        GenerationPayload::Text(s) => Ok(classify(s)),
        GenerationPayload::List(items) => {
            let first = items.first().ok_or_else(|| {
                InferenceError::Extraction("result list is empty".to_string())
            })?;
            resolve_source(first)
        }
        GenerationPayload::Map(map) => {
            let (key, value) = SOURCE_KEYS
                .iter()
                .find_map(|key| map.get(*key).map(|value| (*key, value)))
                .ok_or_else(|| {
                    InferenceError::Extraction(format!(
                        "result object has none of the expected keys {SOURCE_KEYS:?}"
                    ))
                })?;
            match value {
                serde_json::Value::String(s) => Ok(classify(s)),
                other => Err(InferenceError::Extraction(format!(
                    "result key '{key}' holds a non-string value: {other}"
                ))),
            }
        }
    }
}

fn classify(s: &str) -> PayloadSource {
    if s.starts_with("http") {
        PayloadSource::Url(s.to_string())
    } else {
        PayloadSource::LocalPath(s.to_string())
    }
}

/// Load the raw bytes a payload source points at.
///
/// URLs are fetched with the fixed [`FETCH_TIMEOUT`]; local paths are read
/// in full from disk.
pub async fn fetch_source(
    client: &reqwest::Client,
    source: &PayloadSource,
) -> Result<Vec<u8>, InferenceError> {
    match source {
        PayloadSource::Url(url) => {
            let response = client.get(url).timeout(FETCH_TIMEOUT).send().await?;
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
            Ok(response.bytes().await?.to_vec())
        }
        PayloadSource::LocalPath(path) => tokio::fs::read(path).await.map_err(|e| {
            InferenceError::Extraction(format!("could not read result file {path}: {e}"))
        }),
    }
}
