//! Set model: a best-of-three contest built from consecutive matches.

use serde::{Deserialize, Serialize};

use super::{CharacterId, EntityId, SetId, Side};

/// Outcome of a set, persisted as 0 (incomplete), 1, or 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum SetWinner {
    Incomplete,
    P1,
    P2,
}

impl SetWinner {
    /// The winning side, if the set completed.
    pub fn side(self) -> Option<Side> {
        match self {
            SetWinner::Incomplete => None,
            SetWinner::P1 => Some(Side::One),
            SetWinner::P2 => Some(Side::Two),
        }
    }

    pub fn from_side(side: Side) -> Self {
        match side {
            Side::One => SetWinner::P1,
            Side::Two => SetWinner::P2,
        }
    }
}

impl From<SetWinner> for u8 {
    fn from(w: SetWinner) -> u8 {
        match w {
            SetWinner::Incomplete => 0,
            SetWinner::P1 => 1,
            SetWinner::P2 => 2,
        }
    }
}

impl TryFrom<u8> for SetWinner {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            0 => Ok(SetWinner::Incomplete),
            1 => Ok(SetWinner::P1),
            2 => Ok(SetWinner::P2),
            other => Err(format!("invalid set_winner value: {}", other)),
        }
    }
}

/// A best-of-three grouping of 1–3 consecutive matches between one pair.
///
/// Player and character fields come from the first match of the set.
/// Characters may change across rematches; later matches are not reconciled,
/// so `p1_chara_id`/`p2_chara_id` are only guaranteed accurate for match 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Set {
    /// Deterministic identifier (pair ids + set start)
    pub id: SetId,

    /// Player 1 polaris ID
    pub p1_polaris_id: String,

    /// Player 2 polaris ID
    pub p2_polaris_id: String,

    /// Player 1 character, from the first match
    pub p1_chara_id: CharacterId,

    /// Player 2 character, from the first match
    pub p2_chara_id: CharacterId,

    /// First match of the set
    pub match1_id: String,

    /// Second match, if played
    pub match2_id: Option<String>,

    /// Third match, if played
    pub match3_id: Option<String>,

    /// `battle_at` of the first match
    pub set_start: i64,

    /// Outcome: incomplete, player 1, or player 2
    pub set_winner: SetWinner,
}

impl Set {
    /// Create a Set with an ID derived from the pair and start timestamp.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        p1_polaris_id: String,
        p2_polaris_id: String,
        p1_chara_id: CharacterId,
        p2_chara_id: CharacterId,
        match1_id: String,
        match2_id: Option<String>,
        match3_id: Option<String>,
        set_start: i64,
        set_winner: SetWinner,
    ) -> Self {
        let id = EntityId::generate(&[&p1_polaris_id, &p2_polaris_id, &set_start.to_string()]);

        Self {
            id,
            p1_polaris_id,
            p2_polaris_id,
            p1_chara_id,
            p2_chara_id,
            match1_id,
            match2_id,
            match3_id,
            set_start,
            set_winner,
        }
    }

    /// Resolve which side a player occupies in this set.
    pub fn side_of(&self, polaris_id: &str) -> Option<Side> {
        if self.p1_polaris_id == polaris_id {
            Some(Side::One)
        } else if self.p2_polaris_id == polaris_id {
            Some(Side::Two)
        } else {
            None
        }
    }

    /// Whether the set completed with a winner.
    pub fn is_complete(&self) -> bool {
        self.set_winner != SetWinner::Incomplete
    }

    /// Whether the given side won the set.
    pub fn won_by(&self, side: Side) -> bool {
        self.set_winner.side() == Some(side)
    }

    /// A completed set decided in two games, with no third match.
    pub fn is_sweep(&self) -> bool {
        self.is_complete() && self.match3_id.is_none()
    }

    /// Character played by the given side (first-match attribution).
    pub fn chara_for(&self, side: Side) -> CharacterId {
        match side {
            Side::One => self.p1_chara_id,
            Side::Two => self.p2_chara_id,
        }
    }

    /// Match IDs present in this set, in play order.
    pub fn match_ids(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.match1_id.as_str())
            .chain(self.match2_id.as_deref())
            .chain(self.match3_id.as_deref())
    }

    /// Number of matches recorded in this set.
    pub fn match_count(&self) -> usize {
        self.match_ids().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_set(winner: SetWinner, match3: Option<&str>) -> Set {
        Set::new(
            "alice".to_string(),
            "bob".to_string(),
            3,
            7,
            "m1".to_string(),
            Some("m2".to_string()),
            match3.map(str::to_string),
            1_718_240_000,
            winner,
        )
    }

    #[test]
    fn test_set_id_deterministic() {
        let a = sample_set(SetWinner::P1, None);
        let b = sample_set(SetWinner::P1, None);
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn test_side_of() {
        let s = sample_set(SetWinner::P1, None);
        assert_eq!(s.side_of("alice"), Some(Side::One));
        assert_eq!(s.side_of("bob"), Some(Side::Two));
        assert_eq!(s.side_of("eve"), None);
    }

    #[test]
    fn test_won_by_and_complete() {
        let s = sample_set(SetWinner::P2, Some("m3"));
        assert!(s.is_complete());
        assert!(s.won_by(Side::Two));
        assert!(!s.won_by(Side::One));

        let incomplete = sample_set(SetWinner::Incomplete, None);
        assert!(!incomplete.is_complete());
        assert!(!incomplete.won_by(Side::One));
        assert!(!incomplete.won_by(Side::Two));
    }

    #[test]
    fn test_is_sweep() {
        assert!(sample_set(SetWinner::P1, None).is_sweep());
        assert!(!sample_set(SetWinner::P1, Some("m3")).is_sweep());
        assert!(!sample_set(SetWinner::Incomplete, None).is_sweep());
    }

    #[test]
    fn test_match_ids_order() {
        let s = sample_set(SetWinner::P1, Some("m3"));
        let ids: Vec<&str> = s.match_ids().collect();
        assert_eq!(ids, vec!["m1", "m2", "m3"]);
        assert_eq!(s.match_count(), 3);
    }

    #[test]
    fn test_set_winner_serializes_as_number() {
        let s = sample_set(SetWinner::P2, None);
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"set_winner\":2"));

        let back: Set = serde_json::from_str(&json).unwrap();
        assert_eq!(back.set_winner, SetWinner::P2);
    }

    #[test]
    fn test_set_winner_rejects_out_of_range() {
        let err = SetWinner::try_from(3);
        assert!(err.is_err());
    }
}
