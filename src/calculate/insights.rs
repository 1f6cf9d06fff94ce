//! Insight derivation over the matchup metrics map.
//!
//! Each leader insight is one tie-inclusive maximum scan: all character ids
//! achieving the maximum are returned, never an arbitrary single winner.

use std::collections::BTreeMap;

use tracing::warn;

use crate::models::{
    CharacterId, CharacterTable, MatchRecord, MatchupMetrics, MetricLeaders, Set, SetLossDetail,
};

/// Minimum sets against one character before it can drive a recommendation.
pub const RECOMMENDATION_MIN_MATCHES: u32 = 3;

/// Rounds-won ceiling per game for a loss to count as a worst loss.
pub const WORST_LOSS_MAX_ROUNDS: u32 = 1;

/// Neutral recommendation when no opponent qualifies.
pub const NO_WEAKNESS_MESSAGE: &str = "Keep it up! No major weaknesses spotted.";

/// Maximize a selector over the matchup map, keeping ties.
///
/// Ids come out sorted ascending. An empty map yields empty leaders.
pub fn leaders_by<F>(matchups: &BTreeMap<CharacterId, MatchupMetrics>, selector: F) -> MetricLeaders
where
    F: Fn(&MatchupMetrics) -> u32,
{
    let mut leaders = MetricLeaders::default();

    for (&chara_id, metrics) in matchups {
        let value = selector(metrics);
        if leaders.character_ids.is_empty() || value > leaders.max {
            leaders.max = value;
            leaders.character_ids = vec![chara_id];
        } else if value == leaders.max {
            leaders.character_ids.push(chara_id);
        }
    }

    leaders
}

/// Characters that defeated the player the most (by set losses).
pub fn most_defeats_by(matchups: &BTreeMap<CharacterId, MatchupMetrics>) -> MetricLeaders {
    leaders_by(matchups, |m| m.losses)
}

/// Characters the player faced the most.
pub fn most_frequent_opponent(matchups: &BTreeMap<CharacterId, MatchupMetrics>) -> MetricLeaders {
    leaders_by(matchups, |m| m.total_matches)
}

/// Characters that swept the player 2–0 the most.
pub fn hardest_matchup(matchups: &BTreeMap<CharacterId, MatchupMetrics>) -> MetricLeaders {
    leaders_by(matchups, |m| m.swept_losses)
}

/// Scan the set window for 2–0 losses where the player never took more
/// than [`WORST_LOSS_MAX_ROUNDS`] rounds in either game.
///
/// Match details come through `lookup`; a set whose match references do
/// not resolve is skipped rather than failing the scan. Output preserves
/// the window's order.
pub fn worst_set_losses<F>(polaris_id: &str, sets: &[Set], lookup: F) -> Vec<SetLossDetail>
where
    F: Fn(&str) -> Option<MatchRecord>,
{
    let mut losses = Vec::new();

    for set in sets {
        let Some(side) = set.side_of(polaris_id) else {
            continue;
        };
        // Only completed sets the player lost with no third match.
        if !set.is_complete() || set.won_by(side) || set.match3_id.is_some() {
            continue;
        }
        let Some(match2_id) = set.match2_id.as_deref() else {
            continue;
        };

        let Some(m1) = lookup(&set.match1_id) else {
            warn!(set_id = %set.id, match_id = %set.match1_id, "unresolved match reference, skipping set");
            continue;
        };
        let Some(m2) = lookup(match2_id) else {
            warn!(set_id = %set.id, match_id = match2_id, "unresolved match reference, skipping set");
            continue;
        };

        let (Some(side1), Some(side2)) = (m1.side_of(polaris_id), m2.side_of(polaris_id)) else {
            continue;
        };

        let match1_rounds = m1.rounds_for(side1);
        let match2_rounds = m2.rounds_for(side2);
        if match1_rounds > WORST_LOSS_MAX_ROUNDS || match2_rounds > WORST_LOSS_MAX_ROUNDS {
            continue;
        }

        losses.push(SetLossDetail {
            set_start: set.set_start,
            opponent_name: m1.name_for(side1.other()).to_string(),
            opponent_chara_id: m1.chara_for(side1.other()),
            player_chara_id: m1.chara_for(side1),
            match1_rounds,
            match2_rounds,
        });
    }

    losses
}

/// Suggest a matchup to practice.
///
/// Among characters faced more than [`RECOMMENDATION_MIN_MATCHES`] times,
/// picks the lowest win rate; ties prefer the larger sample. Falls back to
/// [`NO_WEAKNESS_MESSAGE`] when nothing qualifies.
pub fn recommendation(
    matchups: &BTreeMap<CharacterId, MatchupMetrics>,
    characters: &CharacterTable,
) -> String {
    let mut worst: Option<(CharacterId, &MatchupMetrics)> = None;

    for (&chara_id, metrics) in matchups {
        if metrics.total_matches <= RECOMMENDATION_MIN_MATCHES {
            continue;
        }
        let better_candidate = match worst {
            None => true,
            Some((_, current)) => {
                metrics.win_rate < current.win_rate
                    || (metrics.win_rate == current.win_rate
                        && metrics.total_matches > current.total_matches)
            }
        };
        if better_candidate {
            worst = Some((chara_id, metrics));
        }
    }

    match worst {
        Some((chara_id, metrics)) => format!(
            "You're struggling against {} ({:.1}% win rate over {} sets). Consider practicing that matchup.",
            characters.resolve(chara_id),
            metrics.win_rate * 100.0,
            metrics.total_matches
        ),
        None => NO_WEAKNESS_MESSAGE.to_string(),
    }
}
