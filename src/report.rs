//! Player report assembly.
//!
//! Pulls a player's set window from the store, runs the analytics engine,
//! and packages the presentation-ready bundle.

use tracing::debug;

use crate::calculate::insights::{
    hardest_matchup, most_defeats_by, most_frequent_opponent, recommendation, worst_set_losses,
};
use crate::calculate::{analyze_matchups, win_rate_trend};
use crate::models::{CharacterTable, PlayerReport};
use crate::storage::{MatchStore, StorageError, DEFAULT_SET_WINDOW};

/// Sets per bucket in the win-rate trend.
pub const TREND_CHUNK_SIZE: usize = 10;

/// Build the full analytics report for one player.
///
/// Total over an empty window: a player with no completed sets gets a
/// zeroed report with the neutral recommendation, never an error.
pub fn build_player_report(
    store: &dyn MatchStore,
    characters: &CharacterTable,
    polaris_id: &str,
) -> Result<PlayerReport, StorageError> {
    build_player_report_with_window(store, characters, polaris_id, DEFAULT_SET_WINDOW)
}

/// Build a report over a caller-chosen window size.
pub fn build_player_report_with_window(
    store: &dyn MatchStore,
    characters: &CharacterTable,
    polaris_id: &str,
    window: usize,
) -> Result<PlayerReport, StorageError> {
    let sets = store.sets_for_player(polaris_id, window)?;
    debug!(player = polaris_id, sets = sets.len(), "building player report");

    let analysis = analyze_matchups(polaris_id, &sets);

    let resolved = store.matches_for_sets(&sets)?;
    let worst_losses = worst_set_losses(polaris_id, &sets, |id| resolved.get(id).cloned());

    Ok(PlayerReport {
        polaris_id: polaris_id.to_string(),
        total_sets: analysis.total_sets,
        win_rate: analysis.win_rate,
        most_frequent_opponent: most_frequent_opponent(&analysis.matchups),
        most_defeats_by: most_defeats_by(&analysis.matchups),
        hardest_matchup: hardest_matchup(&analysis.matchups),
        worst_losses,
        recommendation: recommendation(&analysis.matchups, characters),
        win_rate_trend: win_rate_trend(polaris_id, &sets, TREND_CHUNK_SIZE),
        matchups: analysis.matchups,
    })
}
