//! Read-only match store interface.
//!
//! Analytics never touch files directly; they consume this trait so the
//! data source can be swapped (JSONL data lake, in-memory fixtures).

use std::collections::HashMap;

use super::{EntityType, JsonlReader, JsonlWriter, StorageConfig, StorageError};
use crate::models::{MatchRecord, Set};

/// Default size of a player's analysis window.
pub const DEFAULT_SET_WINDOW: usize = 100;

/// Read access to stored matches and sets.
pub trait MatchStore {
    /// All matches, ordered by `battle_at` ascending.
    fn matches_ordered_by_time(&self) -> Result<Vec<MatchRecord>, StorageError>;

    /// A player's most recent completed sets, `set_start` descending,
    /// at most `limit` entries. Incomplete sets are excluded.
    fn sets_for_player(&self, polaris_id: &str, limit: usize) -> Result<Vec<Set>, StorageError>;

    /// Look up a single match by battle id.
    fn match_by_id(&self, battle_id: &str) -> Result<Option<MatchRecord>, StorageError>;

    /// Bulk-resolve the matches referenced by a slice of sets.
    ///
    /// Unresolvable ids are simply absent from the result.
    fn matches_for_sets(&self, sets: &[Set]) -> Result<HashMap<String, MatchRecord>, StorageError> {
        let mut resolved = HashMap::new();
        for set in sets {
            for id in set.match_ids() {
                if !resolved.contains_key(id) {
                    if let Some(m) = self.match_by_id(id)? {
                        resolved.insert(id.to_string(), m);
                    }
                }
            }
        }
        Ok(resolved)
    }
}

/// JSONL-backed store over the normalized data directory.
pub struct JsonlMatchStore {
    config: StorageConfig,
}

impl JsonlMatchStore {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    /// Append imported matches to the data lake.
    pub fn append_matches(&self, matches: &[MatchRecord]) -> Result<usize, StorageError> {
        JsonlWriter::for_entity(&self.config, EntityType::Match).append_batch(matches)
    }

    /// Replace the stored sets with a freshly generated batch.
    pub fn replace_sets(&self, sets: &[Set]) -> Result<usize, StorageError> {
        JsonlWriter::for_entity(&self.config, EntityType::Set).write_all(sets)
    }

    /// Number of stored matches.
    pub fn match_count(&self) -> Result<usize, StorageError> {
        JsonlReader::<MatchRecord>::for_entity(&self.config, EntityType::Match).count()
    }

    /// Number of stored sets.
    pub fn set_count(&self) -> Result<usize, StorageError> {
        JsonlReader::<Set>::for_entity(&self.config, EntityType::Set).count()
    }
}

impl MatchStore for JsonlMatchStore {
    fn matches_ordered_by_time(&self) -> Result<Vec<MatchRecord>, StorageError> {
        let mut matches =
            JsonlReader::<MatchRecord>::for_entity(&self.config, EntityType::Match).read_all()?;
        matches.sort_by_key(|m| m.battle_at);
        Ok(matches)
    }

    fn sets_for_player(&self, polaris_id: &str, limit: usize) -> Result<Vec<Set>, StorageError> {
        let mut sets = JsonlReader::<Set>::for_entity(&self.config, EntityType::Set)
            .read_where(|s: &Set| s.is_complete() && s.side_of(polaris_id).is_some())?;
        sets.sort_by_key(|s| std::cmp::Reverse(s.set_start));
        sets.truncate(limit);
        Ok(sets)
    }

    fn match_by_id(&self, battle_id: &str) -> Result<Option<MatchRecord>, StorageError> {
        let matches =
            JsonlReader::<MatchRecord>::for_entity(&self.config, EntityType::Match).read_all()?;
        Ok(matches.into_iter().find(|m| m.battle_id == battle_id))
    }

    // One pass over the matches file instead of a read per id.
    fn matches_for_sets(&self, sets: &[Set]) -> Result<HashMap<String, MatchRecord>, StorageError> {
        let wanted: std::collections::HashSet<&str> =
            sets.iter().flat_map(|s| s.match_ids()).collect();
        let matches =
            JsonlReader::<MatchRecord>::for_entity(&self.config, EntityType::Match).read_all()?;
        Ok(matches
            .into_iter()
            .filter(|m| wanted.contains(m.battle_id.as_str()))
            .map(|m| (m.battle_id.clone(), m))
            .collect())
    }
}

/// In-memory store for tests and fixtures.
#[derive(Debug, Default)]
pub struct MemoryMatchStore {
    pub matches: Vec<MatchRecord>,
    pub sets: Vec<Set>,
}

impl MemoryMatchStore {
    pub fn new(matches: Vec<MatchRecord>, sets: Vec<Set>) -> Self {
        Self { matches, sets }
    }
}

impl MatchStore for MemoryMatchStore {
    fn matches_ordered_by_time(&self) -> Result<Vec<MatchRecord>, StorageError> {
        let mut matches = self.matches.clone();
        matches.sort_by_key(|m| m.battle_at);
        Ok(matches)
    }

    fn sets_for_player(&self, polaris_id: &str, limit: usize) -> Result<Vec<Set>, StorageError> {
        let mut sets: Vec<Set> = self
            .sets
            .iter()
            .filter(|s| s.is_complete() && s.side_of(polaris_id).is_some())
            .cloned()
            .collect();
        sets.sort_by_key(|s| std::cmp::Reverse(s.set_start));
        sets.truncate(limit);
        Ok(sets)
    }

    fn match_by_id(&self, battle_id: &str) -> Result<Option<MatchRecord>, StorageError> {
        Ok(self
            .matches
            .iter()
            .find(|m| m.battle_id == battle_id)
            .cloned())
    }
}
