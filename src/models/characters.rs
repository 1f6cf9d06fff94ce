//! Character name lookup table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::CharacterId;

/// Name returned for any character id missing from the table.
pub const UNKNOWN_CHARACTER: &str = "Unknown";

/// Maps roster character ids to display names.
///
/// Lookups never fail: unmapped ids resolve to [`UNKNOWN_CHARACTER`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterTable {
    names: HashMap<CharacterId, String>,
}

impl CharacterTable {
    /// An empty table; every lookup resolves to "Unknown".
    pub fn empty() -> Self {
        Self {
            names: HashMap::new(),
        }
    }

    /// Build a table from (id, name) pairs.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (CharacterId, String)>,
    {
        Self {
            names: pairs.into_iter().collect(),
        }
    }

    /// The Tekken 8 roster.
    pub fn tekken8() -> Self {
        let roster: &[(CharacterId, &str)] = &[
            (0, "Paul"),
            (1, "Law"),
            (2, "King"),
            (3, "Yoshimitsu"),
            (4, "Hwoarang"),
            (5, "Xiaoyu"),
            (6, "Jin"),
            (7, "Bryan"),
            (8, "Kazuya"),
            (9, "Steve"),
            (10, "Jack-8"),
            (11, "Asuka"),
            (12, "Devil Jin"),
            (13, "Feng"),
            (14, "Lili"),
            (15, "Dragunov"),
            (16, "Leo"),
            (17, "Lars"),
            (18, "Alisa"),
            (19, "Claudio"),
            (20, "Shaheen"),
            (21, "Nina"),
            (22, "Lee"),
            (23, "Kuma"),
            (24, "Panda"),
            (28, "Zafina"),
            (29, "Leroy"),
            (32, "Jun"),
            (33, "Reina"),
            (34, "Azucena"),
            (35, "Victor"),
            (36, "Raven"),
            (38, "Eddy"),
            (39, "Lidia"),
            (40, "Heihachi"),
            (41, "Clive"),
            (42, "Anna"),
            (43, "Fahkumram"),
        ];

        Self::from_pairs(roster.iter().map(|&(id, name)| (id, name.to_string())))
    }

    /// Resolve a character id to its display name.
    pub fn resolve(&self, id: CharacterId) -> &str {
        self.names
            .get(&id)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_CHARACTER)
    }

    /// Register or replace a name.
    pub fn insert(&mut self, id: CharacterId, name: String) {
        self.names.insert(id, name);
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for CharacterTable {
    fn default() -> Self {
        Self::tekken8()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_characters_resolve() {
        let table = CharacterTable::tekken8();
        assert_eq!(table.resolve(2), "King");
        assert_eq!(table.resolve(15), "Dragunov");
        assert_eq!(table.resolve(33), "Reina");
    }

    #[test]
    fn test_unmapped_id_resolves_to_unknown() {
        let table = CharacterTable::tekken8();
        assert_eq!(table.resolve(25), UNKNOWN_CHARACTER);
        assert_eq!(table.resolve(999), UNKNOWN_CHARACTER);
    }

    #[test]
    fn test_empty_table() {
        let table = CharacterTable::empty();
        assert!(table.is_empty());
        assert_eq!(table.resolve(0), UNKNOWN_CHARACTER);
    }

    #[test]
    fn test_insert_overrides() {
        let mut table = CharacterTable::empty();
        table.insert(50, "Custom".to_string());
        assert_eq!(table.resolve(50), "Custom");
        assert_eq!(table.len(), 1);
    }
}
