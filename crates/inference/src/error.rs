use mediagen_core::media::MediaType;

/// Errors from the generation service client layer.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote service returned a non-2xx status code.
    #[error("generation service error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// No usable path or URL could be found in the result payload.
    #[error("could not extract a result location: {0}")]
    Extraction(String),

    /// The requested model has no configured service for this media type.
    #[error("unsupported {media_type} model '{model}'")]
    UnsupportedModel { media_type: MediaType, model: String },
}
