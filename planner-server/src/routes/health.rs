//! Liveness endpoint

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /health - Succeeds when the task store answers a ping
async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    state.store().ping().await?;
    Ok(Json(HealthResponse { status: "ok" }))
}
