//! Registry of configured generation services.
//!
//! Each entry binds a (media type, model) pair to the HTTP endpoint of the
//! service that implements it. Entries keep configuration order; the first
//! entry for a media type is that type's default model.

use mediagen_core::media::MediaType;

use crate::error::InferenceError;

/// A single remote generation service endpoint.
#[derive(Debug, Clone)]
pub struct ServiceEndpoint {
    pub media_type: MediaType,
    pub model: String,
    pub url: String,
}

/// Configured generation services, in configuration order.
#[derive(Debug, Clone, Default)]
pub struct ServiceRegistry {
    entries: Vec<ServiceEndpoint>,
}

/// Environment variables holding the per-media-type service lists.
const SERVICE_ENV_VARS: &[(&str, MediaType)] = &[
    ("MEDIAGEN_IMAGE_SERVICES", MediaType::Image),
    ("MEDIAGEN_AUDIO_SERVICES", MediaType::Audio),
    ("MEDIAGEN_VIDEO_SERVICES", MediaType::Video),
];

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the registry from environment variables.
    ///
    /// Each variable is a comma-separated list of `model=url` pairs, e.g.
    /// `MEDIAGEN_IMAGE_SERVICES=kling=http://10.0.0.5:9301/generate,jimeng=http://10.0.0.6:9301/generate`.
    pub fn from_env() -> Self {
        let mut registry = Self::new();
        for (var, media_type) in SERVICE_ENV_VARS {
            if let Ok(spec) = std::env::var(var) {
                registry.extend_from_spec(*media_type, &spec);
            }
        }
        registry
    }

    /// Parse a `model=url,model=url` spec string into registry entries.
    /// Malformed pairs are skipped with a warning rather than failing startup.
    pub fn extend_from_spec(&mut self, media_type: MediaType, spec: &str) {
        for pair in spec.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match pair.split_once('=') {
                Some((model, url)) if !model.trim().is_empty() && !url.trim().is_empty() => {
                    self.register(media_type, model.trim(), url.trim());
                }
                _ => {
                    tracing::warn!(media_type = %media_type, pair, "Skipping malformed service entry");
                }
            }
        }
    }

    /// Register a service endpoint.
    pub fn register(&mut self, media_type: MediaType, model: &str, url: &str) {
        self.entries.push(ServiceEndpoint {
            media_type,
            model: model.to_string(),
            url: url.to_string(),
        });
    }

    /// Number of configured endpoints.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The model a request falls back to when it does not name one:
    /// the first configured service for the media type.
    pub fn default_model(&self, media_type: MediaType) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.media_type == media_type)
            .map(|e| e.model.as_str())
    }

    /// Endpoint for a (media type, model) pair.
    pub fn resolve(
        &self,
        media_type: MediaType,
        model: &str,
    ) -> Result<&ServiceEndpoint, InferenceError> {
        self.entries
            .iter()
            .find(|e| e.media_type == media_type && e.model == model)
            .ok_or_else(|| InferenceError::UnsupportedModel {
                media_type,
                model: model.to_string(),
            })
    }
}
