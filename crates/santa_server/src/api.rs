//! HTTP routes for the assignment server.
//!
//! Handlers touch the data file and hold the store's writer lock, so every
//! call runs on tokio's blocking pool rather than on a runtime worker.

use crate::error::ServerError;
use crate::handler::{ApiReply, RequestHandler};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use santa_protocol::{ASSIGNMENTS_PATH, HEALTH_PATH, IMPORT_PATH, RESET_PATH};
use std::sync::Arc;
use tracing::error;

/// State shared by every route.
#[derive(Clone)]
pub struct ApiState {
    /// Handler the routes delegate to.
    pub handler: Arc<RequestHandler>,
}

/// Builds the API router.
pub fn router(state: ApiState) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(health))
        .route(ASSIGNMENTS_PATH, get(get_assignments))
        .route(RESET_PATH, post(reset))
        .route(IMPORT_PATH, post(import))
        .fallback(not_found)
        .with_state(state)
}

impl IntoResponse for ApiReply {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        match self.body {
            Some(body) => (status, Json(body)).into_response(),
            None => status.into_response(),
        }
    }
}

async fn health() -> &'static str {
    "ok"
}

async fn get_assignments(State(state): State<ApiState>) -> ApiReply {
    run_blocking(state, |handler| handler.get_assignments()).await
}

async fn reset(State(state): State<ApiState>) -> ApiReply {
    run_blocking(state, |handler| handler.reset()).await
}

async fn import(State(state): State<ApiState>, body: Bytes) -> ApiReply {
    run_blocking(state, move |handler| handler.import(&body)).await
}

async fn not_found(State(state): State<ApiState>, method: Method, uri: Uri) -> ApiReply {
    state.handler.route(method.as_str(), uri.path(), &[])
}

async fn run_blocking<F>(state: ApiState, call: F) -> ApiReply
where
    F: FnOnce(&RequestHandler) -> ApiReply + Send + 'static,
{
    let handler = state.handler;
    match tokio::task::spawn_blocking(move || call(&handler)).await {
        Ok(reply) => reply,
        Err(e) => {
            error!(error = %e, "request task failed");
            ServerError::Internal(e.to_string()).into()
        }
    }
}
