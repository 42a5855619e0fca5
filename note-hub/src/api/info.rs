//! Plain-text endpoints outside the notes API.

use axum::{routing::get, Router};

use super::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { "Hello! This is the note-hub server." }))
        .route("/health", get(|| async { "OK" }))
        .route(
            "/info",
            get(|| async { "GET - note-hub keeps personal notes in a JSON file." })
                .post(|| async { "POST - your request arrived." }),
        )
}
