//! Shared harness for API integration tests.
//!
//! Builds the real application router (same middleware stack as `main.rs`)
//! over a temp-dir media storage and a service registry whose endpoints
//! point at an unreachable port: any test reaching a remote service observes
//! upstream-failure handling, and a 400 proves no remote call was attempted.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

use mediagen_api::config::ServerConfig;
use mediagen_api::router::build_app_router;
use mediagen_api::state::AppState;
use mediagen_core::media::MediaType;
use mediagen_core::storage::MediaStorage;
use mediagen_db::models::media_record::CreateMediaRecord;
use mediagen_db::repositories::MediaRecordRepo;
use mediagen_inference::{InferenceClient, ServiceRegistry};

/// Unreachable endpoint base: port 9 (discard) refuses connections.
const DEAD_ENDPOINT: &str = "http://127.0.0.1:9/generate";

/// Test models registered per media type.
pub const IMAGE_MODEL: &str = "test-diffusion";
pub const AUDIO_MODEL: &str = "test-voice";
pub const VIDEO_MODEL: &str = "test-motion";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        media_root: String::new(), // replaced by the temp dir below
        media_base_url: "/media".to_string(),
        generate_timeout_secs: 5,
    }
}

/// The application under test plus handles the tests need.
pub struct TestApp {
    pub router: Router,
    pub storage: Arc<MediaStorage>,
    _media_dir: TempDir,
}

/// Build the full application with all middleware layers, using the given
/// database pool and a fresh temp dir as the media root.
pub fn build_test_app(pool: PgPool) -> TestApp {
    let media_dir = TempDir::new().expect("create temp media dir");
    let storage = Arc::new(MediaStorage::new(media_dir.path(), "/media"));

    let mut registry = ServiceRegistry::new();
    registry.register(MediaType::Image, IMAGE_MODEL, DEAD_ENDPOINT);
    registry.register(MediaType::Audio, AUDIO_MODEL, DEAD_ENDPOINT);
    registry.register(MediaType::Video, VIDEO_MODEL, DEAD_ENDPOINT);

    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        storage: Arc::clone(&storage),
        registry: Arc::new(registry),
        inference: Arc::new(InferenceClient::new(config.generate_timeout())),
    };

    TestApp {
        router: build_app_router(state, &config),
        storage,
        _media_dir: media_dir,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(router: &Router, path: &str) -> Response {
    router
        .clone()
        .oneshot(
            Request::builder()
                .uri(path)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn post_json(router: &Router, path: &str, body: serde_json::Value) -> Response {
    post_raw(router, path, &body.to_string()).await
}

pub async fn post_raw(router: &Router, path: &str, body: &str) -> Response {
    router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).expect("response body should be JSON")
}

// ---------------------------------------------------------------------------
// Seeding helpers
// ---------------------------------------------------------------------------

/// Insert a record directly, optionally writing a backing file into storage.
pub async fn seed_record(
    pool: &PgPool,
    storage: &MediaStorage,
    media_type: &str,
    file: Option<(&str, &[u8])>,
    result_url: &str,
) -> i64 {
    let file_path = match file {
        Some((name, bytes)) => {
            let rel = format!("outputs/{name}");
            storage.save(&rel, bytes).await.expect("seed file");
            Some(rel)
        }
        None => None,
    };

    let record = MediaRecordRepo::create(
        pool,
        &CreateMediaRecord {
            media_type: media_type.to_string(),
            model: "seed-model".to_string(),
            prompt: "seed prompt".to_string(),
            style: String::new(),
            voice: String::new(),
            file_path,
            result_url: result_url.to_string(),
        },
    )
    .await
    .expect("seed record");

    record.id
}
