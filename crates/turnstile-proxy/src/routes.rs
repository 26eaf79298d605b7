//! Control API and the catch-all forwarding handler.

use crate::error::ApiError;
use crate::intercept;
use crate::state::AppState;
use axum::extract::{Query, Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use turnstile_core::TrimSettings;
use turnstile_session::StoredStatus;

/// Request bodies are buffered before forwarding.
const MAX_REQUEST_BODY: usize = 64 * 1024 * 1024;

pub fn control_routes() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(health))
        .route("/ctl/v1/status", get(last_status))
        .route("/ctl/v1/settings", get(read_settings).put(write_settings))
        .route("/ctl/v1/older", post(load_older))
        .route("/ctl/v1/refresh", post(manual_refresh))
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "uptime_secs": state.start_time.elapsed().as_secs(),
    }))
}

#[derive(Debug, Deserialize)]
struct StatusQuery {
    location: String,
}

async fn last_status(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<StoredStatus>, ApiError> {
    state
        .reporter
        .last_for(&query.location)
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("no status recorded for {}", query.location)))
}

async fn read_settings(State(state): State<AppState>) -> Json<TrimSettings> {
    Json(state.settings_snapshot())
}

async fn write_settings(
    State(state): State<AppState>,
    Json(settings): Json<TrimSettings>,
) -> Json<TrimSettings> {
    Json(state.update_settings(settings))
}

async fn load_older(State(state): State<AppState>) -> Json<Value> {
    let settings = state.settings_snapshot();
    let extra = state.viewer.lock().unwrap().request_older(&settings);
    Json(json!({ "extraMessages": extra }))
}

async fn manual_refresh(State(state): State<AppState>) -> StatusCode {
    state.viewer.lock().unwrap().manual_refresh();
    StatusCode::NO_CONTENT
}

/// Forward a request to the upstream and run the response through the
/// interceptor before releasing it to the caller.
pub async fn forward(State(state): State<AppState>, request: Request) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let path_and_query = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| path.clone());
    let headers = request.headers().clone();

    let body = match axum::body::to_bytes(request.into_body(), MAX_REQUEST_BODY).await {
        Ok(bytes) => bytes,
        Err(err) => {
            return ApiError::bad_request(format!("unreadable request body: {err}"))
                .into_response()
        }
    };

    match state
        .upstream
        .fetch(method.clone(), &path_and_query, headers, body)
        .await
    {
        Ok(response) => intercept::process(&state, &method, &path, response).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}
