use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::Set;
use crate::sets::build_sets;
use crate::storage::MatchStore;

// ── Player Sets Endpoint ────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PlayerSetsParams {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct PlayerSetsResponse {
    pub polaris_id: String,
    pub total: usize,
    pub sets: Vec<Set>,
}

pub async fn player_sets(
    State(state): State<AppState>,
    Path(polaris_id): Path<String>,
    Query(params): Query<PlayerSetsParams>,
) -> Result<Json<PlayerSetsResponse>, ApiError> {
    let limit = params.limit.unwrap_or(state.set_window).min(state.set_window);
    if limit == 0 {
        return Err(ApiError::BadRequest("limit must be greater than 0".to_string()));
    }

    let sets = state.store.sets_for_player(&polaris_id, limit)?;

    Ok(Json(PlayerSetsResponse {
        polaris_id,
        total: sets.len(),
        sets,
    }))
}

// ── Set Generation Endpoint ─────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct GenerateSetsResponse {
    pub matches_processed: usize,
    pub sets_generated: usize,
}

pub async fn generate_sets(
    State(state): State<AppState>,
) -> Result<Json<GenerateSetsResponse>, ApiError> {
    let matches = state.store.matches_ordered_by_time()?;
    let sets = build_sets(&matches);
    let written = state.store.replace_sets(&sets)?;

    info!(matches = matches.len(), sets = written, "set generation via API");

    Ok(Json(GenerateSetsResponse {
        matches_processed: matches.len(),
        sets_generated: written,
    }))
}
