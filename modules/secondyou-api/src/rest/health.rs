use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use chrono::Utc;
use serde_json::json;

use crate::AppState;

pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "OK",
        "timestamp": Utc::now().to_rfc3339(),
        "uptime": state.started_at.elapsed().as_secs_f64(),
        "environment": state.environment.as_str(),
    }))
}

/// Probe the generation provider with a trivial prompt.
pub async fn service_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let available = state.orchestrator.check_health().await;
    Json(json!({
        "service": "AI Simulation",
        "status": if available { "available" } else { "unavailable" },
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
