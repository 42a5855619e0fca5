use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use note_hub_core::NoteError;
use serde_json::json;

/// Maps core failures onto HTTP responses.
#[derive(Debug)]
pub struct ApiError(pub NoteError);

impl From<NoteError> for ApiError {
    fn from(err: NoteError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            NoteError::NotFound(_) => (StatusCode::NOT_FOUND, self.0.to_string()).into_response(),
            NoteError::Unauthenticated => {
                let status = StatusCode::UNAUTHORIZED;
                let body = Json(json!({
                    "error": "Missing or rejected identity",
                    "status": status.as_u16()
                }));
                (status, body).into_response()
            }
            NoteError::IdSpaceExhausted => {
                tracing::error!(error = %self.0, "note id allocation failed");
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                let body = Json(json!({
                    "error": "No note id left to allocate",
                    "status": status.as_u16()
                }));
                (status, body).into_response()
            }
            NoteError::StorageUnavailable { .. } => {
                tracing::error!(error = %self.0, "note storage unavailable");
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                let body = Json(json!({
                    "error": "Note storage unavailable",
                    "status": status.as_u16()
                }));
                (status, body).into_response()
            }
        }
    }
}
