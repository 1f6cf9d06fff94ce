//! Derived matchup statistics models.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::CharacterId;

/// Aggregate performance against one opponent character, over a set window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchupMetrics {
    /// Sets won against this character
    pub wins: u32,

    /// Sets lost against this character
    pub losses: u32,

    /// Losses with no third match played (2–0 sweeps)
    pub swept_losses: u32,

    /// Total sets against this character (= wins + losses)
    pub total_matches: u32,

    /// wins / total_matches, 0.0 when empty
    pub win_rate: f64,
}

impl MatchupMetrics {
    /// Record a set win against this character.
    pub fn record_win(&mut self) {
        self.wins += 1;
        self.total_matches += 1;
        self.recompute_rate();
    }

    /// Record a set loss against this character.
    pub fn record_loss(&mut self, swept: bool) {
        self.losses += 1;
        if swept {
            self.swept_losses += 1;
        }
        self.total_matches += 1;
        self.recompute_rate();
    }

    fn recompute_rate(&mut self) {
        self.win_rate = if self.total_matches > 0 {
            self.wins as f64 / self.total_matches as f64
        } else {
            0.0
        };
    }
}

/// Result of a tie-inclusive maximum scan over the matchup map.
///
/// All character ids achieving the maximum are kept, sorted ascending.
/// An empty map yields an empty id list and a max of 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricLeaders {
    pub character_ids: Vec<CharacterId>,
    pub max: u32,
}

impl MetricLeaders {
    pub fn is_empty(&self) -> bool {
        self.character_ids.is_empty()
    }
}

/// One 2–0 loss where the player won at most one round per game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetLossDetail {
    /// Set start, epoch seconds
    pub set_start: i64,

    /// Opponent display name, from the first match
    pub opponent_name: String,

    /// Opponent character
    pub opponent_chara_id: CharacterId,

    /// Player character
    pub player_chara_id: CharacterId,

    /// Rounds the player won in match 1
    pub match1_rounds: u32,

    /// Rounds the player won in match 2
    pub match2_rounds: u32,
}

/// Presentation-ready analytics bundle for one player's set window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerReport {
    /// The player this report covers
    pub polaris_id: String,

    /// Completed sets in the analyzed window
    pub total_sets: u32,

    /// Overall set win rate, 0.0–1.0
    pub win_rate: f64,

    /// Per-opponent-character metrics
    pub matchups: BTreeMap<CharacterId, MatchupMetrics>,

    /// Characters faced most often (ties kept)
    pub most_frequent_opponent: MetricLeaders,

    /// Characters with the most set losses (ties kept)
    pub most_defeats_by: MetricLeaders,

    /// Characters with the most 2–0 sweep losses (ties kept)
    pub hardest_matchup: MetricLeaders,

    /// 2–0 losses where the player never took more than one round
    pub worst_losses: Vec<SetLossDetail>,

    /// Practice suggestion derived from the matchup map
    pub recommendation: String,

    /// Win rate per consecutive chunk of sets, newest chunk first
    pub win_rate_trend: Vec<f64>,
}

impl PlayerReport {
    /// An empty report for a player with no completed sets.
    pub fn empty(polaris_id: String, recommendation: String) -> Self {
        Self {
            polaris_id,
            total_sets: 0,
            win_rate: 0.0,
            matchups: BTreeMap::new(),
            most_frequent_opponent: MetricLeaders::default(),
            most_defeats_by: MetricLeaders::default(),
            hardest_matchup: MetricLeaders::default(),
            worst_losses: Vec::new(),
            recommendation,
            win_rate_trend: Vec::new(),
        }
    }
}
