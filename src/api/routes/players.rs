use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{CharacterId, PlayerReport};
use crate::report::build_player_report_with_window;

/// Player report plus display names for every character id it mentions.
#[derive(Debug, Serialize)]
pub struct PlayerReportResponse {
    #[serde(flatten)]
    pub report: PlayerReport,
    pub characters: BTreeMap<CharacterId, String>,
}

pub async fn player_report(
    State(state): State<AppState>,
    Path(polaris_id): Path<String>,
) -> Result<Json<PlayerReportResponse>, ApiError> {
    let report = build_player_report_with_window(
        state.store.as_ref(),
        &state.characters,
        &polaris_id,
        state.set_window,
    )?;

    let mut mentioned: Vec<CharacterId> = report.matchups.keys().copied().collect();
    mentioned.extend(&report.most_frequent_opponent.character_ids);
    mentioned.extend(&report.most_defeats_by.character_ids);
    mentioned.extend(&report.hardest_matchup.character_ids);
    for loss in &report.worst_losses {
        mentioned.push(loss.opponent_chara_id);
        mentioned.push(loss.player_chara_id);
    }

    let characters: BTreeMap<CharacterId, String> = mentioned
        .into_iter()
        .map(|id| (id, state.characters.resolve(id).to_string()))
        .collect();

    Ok(Json(PlayerReportResponse { report, characters }))
}
