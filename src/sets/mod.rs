//! Set building engine.
//!
//! Partitions a stream of individual matches into best-of-three sets,
//! grouped per unordered player pair. A set closes as soon as one side
//! reaches 2 wins or 3 matches have accumulated; trailing partial buffers
//! are flushed as incomplete sets when a pair's matches run out.

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::{MatchRecord, Set, SetWinner, Side};

/// Symmetric key for an unordered player pair.
///
/// The two ids are stored sorted so grouping does not depend on which
/// side each player occupied in a given match.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairKey(String, String);

impl PairKey {
    pub fn new(a: &str, b: &str) -> Self {
        if a <= b {
            Self(a.to_string(), b.to_string())
        } else {
            Self(b.to_string(), a.to_string())
        }
    }

    /// The pair key of a match's two participants.
    pub fn of_match(m: &MatchRecord) -> Self {
        Self::new(&m.p1_polaris_id, &m.p2_polaris_id)
    }
}

/// Count buffered wins per side number.
///
/// Wins are attributed to the side number recorded in each match; a pair
/// whose players swap sides mid-session is not reconciled.
fn side_wins(buffer: &[&MatchRecord]) -> (u32, u32) {
    let mut p1_wins = 0;
    let mut p2_wins = 0;
    for m in buffer {
        match m.winner_side() {
            Some(Side::One) => p1_wins += 1,
            Some(Side::Two) => p2_wins += 1,
            None => {}
        }
    }
    (p1_wins, p2_wins)
}

/// Whether a buffered run of matches has a decided winner.
fn is_set_complete(buffer: &[&MatchRecord]) -> bool {
    let (p1_wins, p2_wins) = side_wins(buffer);
    p1_wins == 2 || p2_wins == 2
}

/// Close a buffer into a Set.
///
/// Player and character fields come from the first match. A full 3-match
/// buffer without a 2-win side yields an incomplete set rather than a panic.
fn close_set(buffer: &[&MatchRecord]) -> Set {
    let first = buffer[0];
    let (p1_wins, p2_wins) = side_wins(buffer);

    let set_winner = if p1_wins == 2 {
        SetWinner::P1
    } else if p2_wins == 2 {
        SetWinner::P2
    } else {
        SetWinner::Incomplete
    };

    Set::new(
        first.p1_polaris_id.clone(),
        first.p2_polaris_id.clone(),
        first.p1_chara_id,
        first.p2_chara_id,
        first.battle_id.clone(),
        buffer.get(1).map(|m| m.battle_id.clone()),
        buffer.get(2).map(|m| m.battle_id.clone()),
        first.battle_at,
        set_winner,
    )
}

/// Build sets from a collection of match records.
///
/// Matches are grouped by unordered pair, ordered by `battle_at` within
/// each group, and accumulated into best-of-three sets. Every input match
/// lands in exactly one set; temporal order is preserved within a pair.
/// Pairs are emitted in key order, so output is deterministic.
pub fn build_sets(matches: &[MatchRecord]) -> Vec<Set> {
    let mut groups: BTreeMap<PairKey, Vec<&MatchRecord>> = BTreeMap::new();
    for m in matches {
        groups.entry(PairKey::of_match(m)).or_default().push(m);
    }

    let mut sets = Vec::new();
    for (key, mut pair_matches) in groups {
        pair_matches.sort_by_key(|m| m.battle_at);

        let mut buffer: Vec<&MatchRecord> = Vec::with_capacity(3);
        for m in pair_matches {
            buffer.push(m);

            if buffer.len() == 3 || is_set_complete(&buffer) {
                sets.push(close_set(&buffer));
                buffer.clear();
            }
        }

        // Trailing partial set: fewer than 3 matches, no 2-win side.
        if !buffer.is_empty() {
            debug!(pair = ?key, matches = buffer.len(), "flushing trailing incomplete set");
            sets.push(close_set(&buffer));
        }
    }

    debug!(
        matches = matches.len(),
        sets = sets.len(),
        "set generation finished"
    );
    sets
}
