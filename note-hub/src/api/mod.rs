//! HTTP API layer exposing note CRUD endpoints.

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Path, State},
    http::{request::Parts, HeaderName, StatusCode},
    routing::get,
    Json, Router,
};
use note_hub_core::identity::{extract_identity, Identity, IdentityCheck};
use note_hub_core::note::Note;
use note_hub_core::policy::{NewNote, NoteAccessPolicy, NotePatch, NoteReplacement};
use note_hub_core::NoteError;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod errors;
mod info;

pub use errors::ApiError;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub policy: Arc<NoteAccessPolicy>,
    pub identity: Arc<dyn IdentityCheck>,
    pub identity_header: HeaderName,
}

impl AppState {
    pub fn new(policy: NoteAccessPolicy, identity: Arc<dyn IdentityCheck>) -> Self {
        Self {
            policy: Arc::new(policy),
            identity,
            identity_header: axum::http::header::AUTHORIZATION,
        }
    }

    pub fn with_identity_header(mut self, header: HeaderName) -> Self {
        self.identity_header = header;
        self
    }
}

/// Caller identity, checked before any handler touches the store.
#[derive(Clone, Debug)]
pub struct AuthContext {
    pub identity: Identity,
}

impl FromRequestParts<AppState> for AuthContext {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // header values may carry non-ASCII bytes; invalid UTF-8 is decoded lossily
        let raw = parts
            .headers
            .get(&state.identity_header)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());
        let identity = state
            .identity
            .authenticate(extract_identity(raw.as_deref()))
            .await?;
        Ok(Self { identity })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/notes", get(list_notes).post(create_note))
        .route(
            "/notes/{id}",
            get(get_note)
                .put(replace_note)
                .patch(patch_note)
                .delete(delete_note),
        )
        .merge(info::routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn list_notes(
    State(state): State<AppState>,
    auth: AuthContext,
) -> Result<Json<Vec<Note>>, ApiError> {
    Ok(Json(state.policy.list_for(&auth.identity)?))
}

async fn get_note(
    State(state): State<AppState>,
    _auth: AuthContext,
    Path(id): Path<u64>,
) -> Result<Json<Note>, ApiError> {
    state
        .policy
        .get(id)?
        .map(Json)
        .ok_or_else(|| NoteError::NotFound(id).into())
}

async fn create_note(
    State(state): State<AppState>,
    _auth: AuthContext,
    Json(req): Json<NewNote>,
) -> Result<StatusCode, ApiError> {
    state.policy.create(req)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn replace_note(
    State(state): State<AppState>,
    _auth: AuthContext,
    Path(id): Path<u64>,
    Json(req): Json<NoteReplacement>,
) -> Result<StatusCode, ApiError> {
    state.policy.replace(id, req)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn patch_note(
    State(state): State<AppState>,
    _auth: AuthContext,
    Path(id): Path<u64>,
    Json(patch): Json<NotePatch>,
) -> Result<StatusCode, ApiError> {
    state.policy.patch(id, patch)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_note(
    State(state): State<AppState>,
    _auth: AuthContext,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    state.policy.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
