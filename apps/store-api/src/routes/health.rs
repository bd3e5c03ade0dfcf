//! Health probe.
//!
//! Mounted outside the auth guard so monitors don't need credentials.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::dto::HealthResponse;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = state.db.health_check().await;
    Json(HealthResponse {
        status: if database { "ok" } else { "degraded" },
        database,
    })
}
