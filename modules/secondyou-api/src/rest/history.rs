use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use secondyou_common::{RawProfile, SavedSimulation, SimulationResult};
use secondyou_core::history::{apply_query, new_saved_simulation, HistoryQuery};
use secondyou_core::validate_profile;

use crate::auth::UserId;
use crate::error::ApiError;
use crate::rest::simulate::MSG_INVALID_BODY;
use crate::AppState;

/// Most records considered per listing before filtering and paging.
const HISTORY_SCAN_LIMIT: usize = 1000;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSimulationRequest {
    original_data: RawProfile,
    #[serde(flatten)]
    result: SimulationResult,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteResponse {
    id: Uuid,
    is_favorite: bool,
}

fn simulation_id(path: Result<Path<Uuid>, PathRejection>) -> Result<Uuid, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|_| ApiError::validation("Simulation id must be a UUID"))
}

/// POST /api/simulations: store a finished simulation for the caller.
pub async fn save_simulation(
    State(state): State<Arc<AppState>>,
    UserId(user_id): UserId,
    payload: Result<Json<SaveSimulationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SavedSimulation>), ApiError> {
    let Json(body) = payload.map_err(|_| ApiError::validation(MSG_INVALID_BODY))?;
    let profile = validate_profile(&body.original_data)
        .map_err(|e| ApiError::simulation(e, state.environment))?;

    let record = new_saved_simulation(&user_id, &profile, &body.result, Utc::now());
    let saved = state
        .store
        .add(record)
        .await
        .map_err(|e| ApiError::store(e, state.environment))?;

    info!(simulation_id = %saved.id, tags = saved.tags.len(), "Simulation saved");
    Ok((StatusCode::CREATED, Json(saved)))
}

/// GET /api/simulations: the caller's history, filtered, searched and sorted.
pub async fn list_simulations(
    State(state): State<Arc<AppState>>,
    UserId(user_id): UserId,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<Vec<SavedSimulation>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::validation(e.body_text()))?;
    let sims = state
        .store
        .list_for_user(&user_id, HISTORY_SCAN_LIMIT)
        .await
        .map_err(|e| ApiError::store(e, state.environment))?;
    Ok(Json(apply_query(sims, &query)))
}

pub async fn get_simulation(
    State(state): State<Arc<AppState>>,
    UserId(user_id): UserId,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<SavedSimulation>, ApiError> {
    let id = simulation_id(path)?;
    state
        .store
        .get(&user_id, id)
        .await
        .map(Json)
        .map_err(|e| ApiError::store(e, state.environment))
}

pub async fn toggle_favorite(
    State(state): State<Arc<AppState>>,
    UserId(user_id): UserId,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<FavoriteResponse>, ApiError> {
    let id = simulation_id(path)?;
    let is_favorite = state
        .store
        .toggle_favorite(&user_id, id)
        .await
        .map_err(|e| ApiError::store(e, state.environment))?;
    Ok(Json(FavoriteResponse { id, is_favorite }))
}

pub async fn delete_simulation(
    State(state): State<Arc<AppState>>,
    UserId(user_id): UserId,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = simulation_id(path)?;
    state
        .store
        .delete(&user_id, id)
        .await
        .map_err(|e| ApiError::store(e, state.environment))?;
    info!(simulation_id = %id, "Simulation deleted");
    Ok(StatusCode::NO_CONTENT)
}
