//! Match record model: one recorded ranked game between two players.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Type alias for character IDs as used by the game's roster table.
pub type CharacterId = u32;

/// Which side of a match or set a player occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    One,
    Two,
}

impl Side {
    /// The opposing side.
    pub fn other(self) -> Self {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }

    /// The side's number as persisted in match/set records (1 or 2).
    pub fn number(self) -> u8 {
        match self {
            Side::One => 1,
            Side::Two => 2,
        }
    }

    /// Parse a persisted side number. Returns None for anything but 1 or 2.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Side::One),
            2 => Some(Side::Two),
            _ => None,
        }
    }
}

/// A single recorded game between two players.
///
/// Field layout mirrors the ranked match CSV export: flat `p1_*`/`p2_*`
/// columns plus battle metadata. Records are immutable once imported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Unique battle identifier from the game service
    pub battle_id: String,

    /// Epoch seconds of the match start; orders matches within a pair
    pub battle_at: i64,

    /// Battle type code (ranked, quick, etc.)
    pub battle_type: u32,

    /// Game version the match was played on
    pub game_version: u32,

    /// Stage identifier
    pub stage_id: u32,

    /// Winning side: 1 or 2
    pub winner: u8,

    /// Player 1 display name
    pub p1_name: String,

    /// Player 1 polaris ID
    pub p1_polaris_id: String,

    /// Player 1 character
    pub p1_chara_id: CharacterId,

    /// Player 1 power rating
    pub p1_power: Option<u64>,

    /// Player 1 rank
    pub p1_rank: Option<u32>,

    /// Rounds won by player 1
    pub p1_rounds: u32,

    /// Player 2 display name
    pub p2_name: String,

    /// Player 2 polaris ID
    pub p2_polaris_id: String,

    /// Player 2 character
    pub p2_chara_id: CharacterId,

    /// Player 2 power rating
    pub p2_power: Option<u64>,

    /// Player 2 rank
    pub p2_rank: Option<u32>,

    /// Rounds won by player 2
    pub p2_rounds: u32,
}

impl MatchRecord {
    /// Resolve which side a player occupies in this match.
    ///
    /// Returns None when the player is not a participant. Every analyzer
    /// goes through this one resolution rather than comparing ids inline.
    pub fn side_of(&self, polaris_id: &str) -> Option<Side> {
        if self.p1_polaris_id == polaris_id {
            Some(Side::One)
        } else if self.p2_polaris_id == polaris_id {
            Some(Side::Two)
        } else {
            None
        }
    }

    /// The side that won this match, if the winner field is well-formed.
    pub fn winner_side(&self) -> Option<Side> {
        Side::from_number(self.winner)
    }

    /// Whether the given side won the match.
    pub fn won_by(&self, side: Side) -> bool {
        self.winner == side.number()
    }

    /// Rounds won by the given side.
    pub fn rounds_for(&self, side: Side) -> u32 {
        match side {
            Side::One => self.p1_rounds,
            Side::Two => self.p2_rounds,
        }
    }

    /// Character played by the given side.
    pub fn chara_for(&self, side: Side) -> CharacterId {
        match side {
            Side::One => self.p1_chara_id,
            Side::Two => self.p2_chara_id,
        }
    }

    /// Display name of the given side.
    pub fn name_for(&self, side: Side) -> &str {
        match side {
            Side::One => &self.p1_name,
            Side::Two => &self.p2_name,
        }
    }

    /// Polaris ID of the given side.
    pub fn polaris_for(&self, side: Side) -> &str {
        match side {
            Side::One => &self.p1_polaris_id,
            Side::Two => &self.p2_polaris_id,
        }
    }

    /// Match start as a UTC timestamp, if `battle_at` is representable.
    pub fn played_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.battle_at, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_support::match_record;

    #[test]
    fn test_side_other_and_number() {
        assert_eq!(Side::One.other(), Side::Two);
        assert_eq!(Side::Two.other(), Side::One);
        assert_eq!(Side::One.number(), 1);
        assert_eq!(Side::Two.number(), 2);
    }

    #[test]
    fn test_side_from_number() {
        assert_eq!(Side::from_number(1), Some(Side::One));
        assert_eq!(Side::from_number(2), Some(Side::Two));
        assert_eq!(Side::from_number(0), None);
        assert_eq!(Side::from_number(3), None);
    }

    #[test]
    fn test_side_of_participant() {
        let m = match_record("b1", 100, ("alice", 3, 3), ("bob", 7, 1), 1);
        assert_eq!(m.side_of("alice"), Some(Side::One));
        assert_eq!(m.side_of("bob"), Some(Side::Two));
        assert_eq!(m.side_of("carol"), None);
    }

    #[test]
    fn test_winner_side_and_won_by() {
        let m = match_record("b1", 100, ("alice", 3, 3), ("bob", 7, 1), 2);
        assert_eq!(m.winner_side(), Some(Side::Two));
        assert!(m.won_by(Side::Two));
        assert!(!m.won_by(Side::One));
    }

    #[test]
    fn test_per_side_accessors() {
        let m = match_record("b1", 100, ("alice", 3, 3), ("bob", 7, 1), 1);
        assert_eq!(m.rounds_for(Side::One), 3);
        assert_eq!(m.rounds_for(Side::Two), 1);
        assert_eq!(m.chara_for(Side::One), 3);
        assert_eq!(m.chara_for(Side::Two), 7);
        assert_eq!(m.polaris_for(Side::Two), "bob");
        assert_eq!(m.name_for(Side::One), "name-alice");
    }

    #[test]
    fn test_played_at() {
        let m = match_record("b1", 1_718_240_000, ("alice", 3, 3), ("bob", 7, 1), 1);
        let ts = m.played_at().unwrap();
        assert_eq!(ts.timestamp(), 1_718_240_000);
    }

    #[test]
    fn test_serialization_round_trip() {
        let m = match_record("b1", 100, ("alice", 3, 3), ("bob", 7, 1), 1);
        let json = serde_json::to_string(&m).unwrap();
        let back: MatchRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.battle_id, m.battle_id);
        assert_eq!(back.p2_chara_id, m.p2_chara_id);
    }
}
