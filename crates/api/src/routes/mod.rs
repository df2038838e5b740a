pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{generation, records};
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Paths keep their trailing slashes; clients address them exactly as
/// listed.
///
/// ```text
/// GET  /records/               -> list_records
/// POST /records/create/        -> create_record
/// POST /records/download/      -> download_batch (zip)
/// POST /records/{id}/delete/   -> delete_record
/// GET  /records/{id}/download/ -> download_record
/// POST /image/                 -> generate_image
/// POST /audio/                 -> generate_audio
/// POST /video/                 -> generate_video
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/records/", get(records::list_records))
        .route("/records/create/", post(records::create_record))
        .route("/records/download/", post(records::download_batch))
        .route("/records/{id}/delete/", post(records::delete_record))
        .route("/records/{id}/download/", get(records::download_record))
        .route("/image/", post(generation::generate_image))
        .route("/audio/", post(generation::generate_audio))
        .route("/video/", post(generation::generate_video))
}
