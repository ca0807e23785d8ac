use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use ai_client::truncate_to_char_boundary;
use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, State},
    response::Json,
};
use tracing::{info, warn};

use secondyou_common::{RawProfile, SimulationResult};
use secondyou_core::validate_profile;

use crate::error::ApiError;
use crate::AppState;

pub const MSG_INVALID_BODY: &str = "Request body must be a JSON object";

/// POST /api/simulate: validate the profile, then generate both paths.
pub async fn simulate(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    payload: Result<Json<RawProfile>, JsonRejection>,
) -> Result<Json<SimulationResult>, ApiError> {
    if !state.rate_limiter.check(addr.ip(), Instant::now()).await {
        warn!("Simulation rate limit exceeded");
        return Err(ApiError::too_many_requests());
    }

    let Json(raw) = payload.map_err(|e| {
        warn!(status = %e.status(), "Rejected simulation body");
        ApiError::validation(MSG_INVALID_BODY)
    })?;

    let profile =
        validate_profile(&raw).map_err(|e| ApiError::simulation(e, state.environment))?;

    // Previews only: profile text is user-authored.
    info!(
        age = profile.age,
        profession = truncate_to_char_boundary(&profile.profession, 50),
        decision = truncate_to_char_boundary(&profile.alternate_path, 100),
        provider = state.orchestrator.provider(),
        "Starting life simulation"
    );

    let result = state.orchestrator.generate(&profile).await.map_err(|e| {
        warn!(error = %e, "Simulation failed");
        ApiError::simulation(e, state.environment)
    })?;

    Ok(Json(result))
}
