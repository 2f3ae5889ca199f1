//! HTTP façade mapping requests onto store operations.
//!
//! Every endpoint is a GET with query parameters. Parameters arrive as raw
//! strings and are checked by typed request structs before dispatch, so a
//! malformed `id` or `done` is rejected as a validation error rather than
//! silently coerced. All API responses share the `{ok, ...}` envelope.

use crate::assets;
use crate::store::{Store, StoreError};
use crate::types::ValidationError;
use axum::extract::{Query, State};
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use eyre::{Context, Result};
use serde::Deserialize;
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared server state: the store behind a lock.
///
/// Handlers hold the lock for the whole operation, so mutations and their
/// persistence are serialized even though the runtime is multi-threaded.
pub struct AppState {
    store: Mutex<Store>,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }
}

/// API failure, mapped onto an HTTP status plus the `{ok:false}` envelope.
enum ApiError {
    Validation(String),
    NotFound(String),
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::ItemNotFound(_) => ApiError::NotFound(e.to_string()),
            StoreError::Validation(_) => ApiError::Validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::Validation(StoreError::Validation(e).to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };
        (status, Json(json!({ "ok": false, "error": error }))).into_response()
    }
}

type ApiResult = Result<Json<Value>, ApiError>;

fn parse_done(raw: &str) -> Result<bool, ValidationError> {
    match raw {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ValidationError::InvalidDone(raw.to_string())),
    }
}

fn parse_id(raw: Option<String>) -> Result<u64, ValidationError> {
    let raw = raw.unwrap_or_default();
    match raw.parse::<u64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ValidationError::InvalidId(raw)),
    }
}

/// Raw query parameters for `/api/list`.
#[derive(Debug, Deserialize)]
struct ListParams {
    done: Option<String>,
    q: Option<String>,
}

/// Raw query parameters for the single-item endpoints.
#[derive(Debug, Deserialize)]
struct IdParams {
    id: Option<String>,
}

/// Raw query parameters for `/api/item/add`.
#[derive(Debug, Deserialize)]
struct AddParams {
    text: Option<String>,
    done: Option<String>,
}

/// Raw query parameters for `/api/item/update`.
#[derive(Debug, Deserialize)]
struct UpdateParams {
    id: Option<String>,
    text: Option<String>,
}

async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

async fn list(State(state): State<Arc<AppState>>, Query(params): Query<ListParams>) -> ApiResult {
    let done = params.done.as_deref().map(parse_done).transpose()?;
    let q = params.q.filter(|q| !q.is_empty());

    let store = state.store.lock().await;
    let items = store.list(done, q.as_deref());

    Ok(Json(json!({ "ok": true, "items": items })))
}

async fn get_item(State(state): State<Arc<AppState>>, Query(params): Query<IdParams>) -> ApiResult {
    let id = parse_id(params.id)?;

    let store = state.store.lock().await;
    let item = store.get(id).ok_or(StoreError::ItemNotFound(id))?;

    Ok(Json(json!({ "ok": true, "item": item })))
}

async fn add_item(State(state): State<Arc<AppState>>, Query(params): Query<AddParams>) -> ApiResult {
    let done = params.done.as_deref().map(parse_done).transpose()?.unwrap_or(false);
    let text = params.text.unwrap_or_default();

    let mut store = state.store.lock().await;
    let item = store.add(&text, done)?;
    log::debug!("Added item {}", item.id);

    Ok(Json(json!({ "ok": true, "item": item })))
}

async fn update_item(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UpdateParams>,
) -> ApiResult {
    let id = parse_id(params.id)?;
    let text = params.text.unwrap_or_default();

    let mut store = state.store.lock().await;
    let item = store.update(id, &text)?;
    log::debug!("Updated item {}", item.id);

    Ok(Json(json!({ "ok": true, "item": item })))
}

async fn toggle_item(
    State(state): State<Arc<AppState>>,
    Query(params): Query<IdParams>,
) -> ApiResult {
    let id = parse_id(params.id)?;

    let mut store = state.store.lock().await;
    let item = store.toggle(id)?;

    Ok(Json(json!({ "ok": true, "item": item })))
}

async fn delete_item(
    State(state): State<Arc<AppState>>,
    Query(params): Query<IdParams>,
) -> ApiResult {
    let id = parse_id(params.id)?;

    let mut store = state.store.lock().await;
    store.delete(id)?;
    log::debug!("Deleted item {}", id);

    Ok(Json(json!({ "ok": true })))
}

async fn clear_completed(State(state): State<Arc<AppState>>) -> Json<Value> {
    let mut store = state.store.lock().await;
    let removed = store.clear_completed();
    log::debug!("Cleared {} completed item(s)", removed);

    Json(json!({ "ok": true }))
}

async fn stats(State(state): State<Arc<AppState>>) -> Json<Value> {
    let store = state.store.lock().await;
    Json(json!({ "ok": true, "stats": store.stats() }))
}

/// Everything that misses an API route: unknown API paths get the JSON
/// envelope, whitelisted static assets are served, the rest is a plain 404.
async fn fallback(uri: Uri) -> Response {
    let path = uri.path();

    if path == "/api" || path.starts_with("/api/") {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "ok": false, "error": "Endpoint not found" })),
        )
            .into_response();
    }

    match assets::lookup(path) {
        Some(asset) => ([(header::CONTENT_TYPE, asset.content_type)], asset.body).into_response(),
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/list", get(list))
        .route("/api/item/get", get(get_item))
        .route("/api/item/add", get(add_item))
        .route("/api/item/update", get(update_item))
        .route("/api/item/toggle", get(toggle_item))
        .route("/api/item/delete", get(delete_item))
        .route("/api/clear-completed", get(clear_completed))
        .route("/api/stats", get(stats))
        .fallback(fallback)
        .with_state(state)
}

/// Run the HTTP server until the process is stopped.
pub async fn serve(store: Store, addr: SocketAddr) -> Result<()> {
    let app = router(Arc::new(AppState::new(store)));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    log::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
