//! Matchup analytics engine.
//!
//! Computes derived metrics from a player's set window:
//! - Overall set win rate
//! - Per-opponent-character matchup metrics
//! - Insight scans (hardest matchup, most frequent opponent, worst losses)
//! - Rolling win-rate trend

pub mod insights;

use std::collections::BTreeMap;

use tracing::warn;

use crate::models::{CharacterId, MatchupMetrics, Set};

/// Per-player analysis of a set window.
#[derive(Debug, Clone, Default)]
pub struct MatchupAnalysis {
    /// Sets actually attributed to the player
    pub total_sets: u32,

    /// Sets the player won
    pub wins: u32,

    /// wins / total_sets, 0.0 for an empty window
    pub win_rate: f64,

    /// Per-opponent-character metrics
    pub matchups: BTreeMap<CharacterId, MatchupMetrics>,
}

/// Calculate win rate from wins and total sets.
pub fn calculate_win_rate(wins: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        wins as f64 / total as f64
    }
}

/// Analyze a player's set window into per-opponent-character metrics.
///
/// The window is expected to hold completed sets only. Sets where the
/// player is not a participant are skipped; a correctly filtered window
/// never contains one. A loss with no third match counts as a sweep.
pub fn analyze_matchups(polaris_id: &str, sets: &[Set]) -> MatchupAnalysis {
    let mut analysis = MatchupAnalysis::default();

    for set in sets {
        let Some(side) = set.side_of(polaris_id) else {
            warn!(set_id = %set.id, player = polaris_id, "set without the requested player, skipping");
            continue;
        };

        let opponent_chara = set.chara_for(side.other());
        let entry = analysis.matchups.entry(opponent_chara).or_default();

        analysis.total_sets += 1;
        if set.won_by(side) {
            analysis.wins += 1;
            entry.record_win();
        } else {
            entry.record_loss(set.match3_id.is_none());
        }
    }

    analysis.win_rate = calculate_win_rate(analysis.wins, analysis.total_sets);
    analysis
}

/// Rolling win rate over consecutive chunks of the window.
///
/// The window is expected newest-first; each element is the win rate of one
/// chunk of `chunk_size` sets. A trailing chunk smaller than `chunk_size`
/// is dropped.
pub fn win_rate_trend(polaris_id: &str, sets: &[Set], chunk_size: usize) -> Vec<f64> {
    if chunk_size == 0 {
        return Vec::new();
    }

    sets.chunks(chunk_size)
        .filter(|chunk| chunk.len() == chunk_size)
        .map(|chunk| {
            let wins = chunk
                .iter()
                .filter(|set| {
                    set.side_of(polaris_id)
                        .is_some_and(|side| set.won_by(side))
                })
                .count() as u32;
            calculate_win_rate(wins, chunk.len() as u32)
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::test_support::set_vs;
    use super::*;

    #[test]
    fn test_calculate_win_rate() {
        assert!((calculate_win_rate(5, 6) - 0.833).abs() < 0.01);
        assert_eq!(calculate_win_rate(0, 0), 0.0);
        assert_eq!(calculate_win_rate(3, 6), 0.5);
    }

    #[test]
    fn test_analyze_empty_window() {
        let analysis = analyze_matchups("alice", &[]);
        assert_eq!(analysis.total_sets, 0);
        assert_eq!(analysis.win_rate, 0.0);
        assert!(analysis.matchups.is_empty());
    }

    #[test]
    fn test_analyze_accumulates_per_character() {
        let sets = vec![
            set_vs("alice", "bob", 7, true, false, 400),
            set_vs("alice", "bob", 7, false, true, 300),
            set_vs("alice", "carol", 15, false, false, 200),
            set_vs("alice", "dave", 7, true, false, 100),
        ];

        let analysis = analyze_matchups("alice", &sets);
        assert_eq!(analysis.total_sets, 4);
        assert_eq!(analysis.wins, 2);
        assert_eq!(analysis.win_rate, 0.5);

        let vs_bryan = &analysis.matchups[&7];
        assert_eq!(vs_bryan.wins, 2);
        assert_eq!(vs_bryan.losses, 1);
        assert_eq!(vs_bryan.swept_losses, 1);
        assert_eq!(vs_bryan.total_matches, 3);

        let vs_dragunov = &analysis.matchups[&15];
        assert_eq!(vs_dragunov.losses, 1);
        assert_eq!(vs_dragunov.swept_losses, 0);
    }

    #[test]
    fn test_analyze_skips_foreign_sets() {
        let sets = vec![
            set_vs("alice", "bob", 7, true, false, 200),
            set_vs("carol", "dave", 9, true, false, 100),
        ];

        let analysis = analyze_matchups("alice", &sets);
        assert_eq!(analysis.total_sets, 1);
        assert_eq!(analysis.matchups.len(), 1);
    }

    #[test]
    fn test_analyze_player_on_side_two() {
        // Player as p2: a P2 set win must count for them.
        let set = crate::models::Set::new(
            "bob".to_string(),
            "alice".to_string(),
            7,
            8,
            "m1".to_string(),
            Some("m2".to_string()),
            None,
            100,
            crate::models::SetWinner::P2,
        );

        let analysis = analyze_matchups("alice", &[set]);
        assert_eq!(analysis.wins, 1);
        // Opponent character is side one's.
        assert!(analysis.matchups.contains_key(&7));
    }

    #[test]
    fn test_metrics_invariants() {
        let sets = vec![
            set_vs("alice", "bob", 7, true, false, 500),
            set_vs("alice", "bob", 7, false, true, 400),
            set_vs("alice", "bob", 7, false, true, 300),
            set_vs("alice", "bob", 7, false, false, 200),
        ];

        let analysis = analyze_matchups("alice", &sets);
        for metrics in analysis.matchups.values() {
            assert_eq!(metrics.wins + metrics.losses, metrics.total_matches);
            assert!(metrics.swept_losses <= metrics.losses);
            assert_eq!(
                metrics.win_rate,
                calculate_win_rate(metrics.wins, metrics.total_matches)
            );
        }
    }

    #[test]
    fn test_trend_chunking() {
        // 5 sets, chunk of 2: two full chunks, trailing single set dropped.
        let sets = vec![
            set_vs("alice", "bob", 7, true, false, 500),
            set_vs("alice", "bob", 7, true, false, 400),
            set_vs("alice", "bob", 7, false, true, 300),
            set_vs("alice", "bob", 7, false, true, 200),
            set_vs("alice", "bob", 7, true, false, 100),
        ];

        let trend = win_rate_trend("alice", &sets, 2);
        assert_eq!(trend, vec![1.0, 0.0]);
    }

    #[test]
    fn test_trend_empty_and_zero_chunk() {
        assert!(win_rate_trend("alice", &[], 10).is_empty());
        let sets = vec![set_vs("alice", "bob", 7, true, false, 100)];
        assert!(win_rate_trend("alice", &sets, 0).is_empty());
    }
}
