//! CSV import pipeline.
//!
//! Reads ranked match exports and validates them before anything reaches
//! the data lake. Integrity failures abort the import run; the set builder
//! downstream assumes every stored match is well-formed.

use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;
use tracing::info;

use crate::models::MatchRecord;
use crate::storage::{JsonlMatchStore, StorageError};

/// Errors raised by the import job.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

fn polaris_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]{4,32}$").expect("valid regex"))
}

/// Validate one imported record.
///
/// Rejects the malformed pairs the set builder cannot handle: missing or
/// ill-shaped polaris ids, self-pairing, an out-of-range winner, and
/// impossible round counts.
fn validate_record(
    row: usize,
    record: &MatchRecord,
    seen_ids: &mut HashSet<String>,
) -> Result<(), IngestError> {
    let invalid = |reason: String| IngestError::InvalidRecord { row, reason };

    if record.battle_id.trim().is_empty() {
        return Err(invalid("empty battle_id".to_string()));
    }
    if !seen_ids.insert(record.battle_id.clone()) {
        return Err(invalid(format!("duplicate battle_id {}", record.battle_id)));
    }

    for (label, id) in [
        ("p1_polaris_id", &record.p1_polaris_id),
        ("p2_polaris_id", &record.p2_polaris_id),
    ] {
        if !polaris_id_pattern().is_match(id) {
            return Err(invalid(format!("malformed {}: {:?}", label, id)));
        }
    }

    if record.p1_polaris_id == record.p2_polaris_id {
        return Err(invalid(format!(
            "self-paired match for {}",
            record.p1_polaris_id
        )));
    }

    if record.winner != 1 && record.winner != 2 {
        return Err(invalid(format!("winner must be 1 or 2, got {}", record.winner)));
    }

    if record.p1_rounds > 3 || record.p2_rounds > 3 {
        return Err(invalid(format!(
            "round counts out of range: {} / {}",
            record.p1_rounds, record.p2_rounds
        )));
    }

    Ok(())
}

/// Read and validate a CSV export of match records.
///
/// The first invalid row aborts the whole run; a partial import would
/// leave the data lake inconsistent with the export.
pub fn import_csv(path: &Path) -> Result<Vec<MatchRecord>, IngestError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    let mut seen_ids = HashSet::new();

    for (idx, result) in reader.deserialize::<MatchRecord>().enumerate() {
        // Row numbers are 1-based data rows, header excluded.
        let row = idx + 1;
        let record = result?;
        validate_record(row, &record, &mut seen_ids)?;
        records.push(record);
    }

    info!(path = %path.display(), count = records.len(), "CSV import parsed");
    Ok(records)
}

/// Import a CSV export and append it to the store.
///
/// Returns the number of matches written.
pub fn import_csv_into(store: &JsonlMatchStore, path: &Path) -> Result<usize, IngestError> {
    let records = import_csv(path)?;
    let written = store.append_matches(&records)?;
    Ok(written)
}
