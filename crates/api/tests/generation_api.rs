//! Integration tests for the generation proxy endpoints.
//!
//! The test registry's endpoints point at an unreachable port, so any
//! request that passes validation observes a 502; a 400 proves validation
//! rejected the request before a remote call could happen.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json, post_raw};
use sqlx::PgPool;

async fn record_count(app: &common::TestApp) -> i64 {
    let json = body_json(get(&app.router, "/api/records/").await).await;
    json["total"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Input validation (no remote call issued)
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn empty_prompt_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        &app.router,
        "/api/image/",
        serde_json::json!({ "prompt": "", "model": common::IMAGE_MODEL }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(record_count(&app).await, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn whitespace_prompt_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        &app.router,
        "/api/audio/",
        serde_json::json!({ "prompt": "   \n ", "model": common::AUDIO_MODEL }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_prompt_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(&app.router, "/api/video/", serde_json::json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_json_body_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_raw(&app.router, "/api/image/", "prompt=cat").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("invalid JSON"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unsupported_model_returns_400_without_record(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        &app.router,
        "/api/image/",
        serde_json::json!({ "prompt": "a cat", "model": "no-such-model" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "unsupported model");
    assert!(json["detail"].as_str().unwrap().contains("no-such-model"));
    assert_eq!(record_count(&app).await, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn model_registered_for_other_media_type_is_unsupported(pool: PgPool) {
    let app = common::build_test_app(pool);
    // The image model exists, but not for video generation.
    let response = post_json(
        &app.router,
        "/api/video/",
        serde_json::json!({ "prompt": "a cat", "model": common::IMAGE_MODEL }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Upstream failures (remote call attempted, single try, 502)
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn unreachable_service_returns_502_without_record(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        &app.router,
        "/api/image/",
        serde_json::json!({ "prompt": "a cat", "model": common::IMAGE_MODEL }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["error"], "generation service request failed");
    assert!(json["detail"].is_string());
    assert_eq!(record_count(&app).await, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn omitted_model_falls_back_to_default_service(pool: PgPool) {
    let app = common::build_test_app(pool);
    // No model in the body: the default (first registered) video service is
    // used, and since it is unreachable the request surfaces as 502 — which
    // proves default resolution got as far as the remote call.
    let response = post_json(
        &app.router,
        "/api/video/",
        serde_json::json!({ "prompt": "waves", "num_frames": 24 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn audio_generation_failure_reports_detail(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        &app.router,
        "/api/audio/",
        serde_json::json!({ "prompt": "hello", "voice": "alto" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert!(!json["detail"].as_str().unwrap().is_empty());
}
