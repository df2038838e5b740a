use std::sync::Arc;

use mediagen_core::storage::MediaStorage;
use mediagen_inference::{InferenceClient, ServiceRegistry};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: mediagen_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Local file storage for generation output.
    pub storage: Arc<MediaStorage>,
    /// Configured generation services.
    pub registry: Arc<ServiceRegistry>,
    /// HTTP client for the generation services.
    pub inference: Arc<InferenceClient>,
}
