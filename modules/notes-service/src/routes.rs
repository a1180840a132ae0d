//! Axum route handlers for the notes API.

use crate::error::{ApiError, ApiResult};
use crate::store::NoteStore;
use axum::Router;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::get;
use notes_types::*;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

const GREETING: &str = "Hello from NEW version 🚀";

pub struct AppState {
    pub store: Arc<NoteStore>,
    pub index_path: PathBuf,
    pub start_time: Instant,
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = tower_http::cors::CorsLayer::permissive();

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/notes", get(list_notes).post(create_note))
        .route(
            "/api/notes/:id",
            get(get_note).put(update_note).delete(delete_note),
        )
        .route("/rpc/status", get(status))
        .with_state(state)
        .layer(cors)
}

/// Accepts only a JSON object body; anything else is a bad request.
fn object_body(body: Result<Json<Value>, JsonRejection>) -> ApiResult<Note> {
    match body {
        Ok(Json(Value::Object(note))) => Ok(note),
        Ok(Json(_)) => Err(ApiError::BadRequest("note body must be a JSON object".to_string())),
        Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
    }
}

// GET /
pub async fn root(State(state): State<Arc<AppState>>) -> Response {
    match tokio::fs::read_to_string(&state.index_path).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            log::debug!(
                "Index {} unavailable ({}), serving greeting",
                state.index_path.display(),
                e
            );
            GREETING.into_response()
        }
    }
}

// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::up())
}

// GET /api/notes
pub async fn list_notes(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Note>>> {
    Ok(Json(state.store.load()?))
}

// GET /api/notes/:id
pub async fn get_note(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Note>> {
    log::debug!("Looking up note {}", id);
    state
        .store
        .get(&id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("note {} not found", id)))
}

// POST /api/notes
pub async fn create_note(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Note>)> {
    let note = object_body(body)?;
    if note_id(&note).is_none() {
        log::warn!("Storing note without a string id");
    }
    let stored = state.store.append(note)?;
    log::info!("Created note {}", note_id(&stored).unwrap_or("<none>"));
    Ok((StatusCode::CREATED, Json(stored)))
}

// PUT /api/notes/:id
pub async fn update_note(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Note>> {
    let patch = object_body(body)?;
    state
        .store
        .merge_by_id(&id, patch)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("note {} not found", id)))
}

// DELETE /api/notes/:id
pub async fn delete_note(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeletedResponse>> {
    let deleted = state.store.delete_by_id(&id)?;
    log::info!("Deleted note {}", deleted);
    Ok(Json(DeletedResponse { deleted }))
}

// GET /rpc/status
pub async fn status(State(state): State<Arc<AppState>>) -> Json<RpcResponse<ServiceStatus>> {
    Json(RpcResponse::ok(ServiceStatus {
        running: true,
        uptime_secs: state.start_time.elapsed().as_secs(),
        total_notes: state.store.count().unwrap_or(0),
        data_path: state.store.path().display().to_string(),
    }))
}
