//! # Polaris Tracker
//!
//! A local Tekken 8 ranked match tracker with best-of-three set analytics.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (matches, sets, matchup metrics)
//! - **sets**: Match-to-set grouping engine
//! - **calculate**: Matchup analytics and insight derivation
//! - **report**: Per-player report assembly
//! - **storage**: Filesystem data lake operations (JSONL) and the match store
//! - **ingest**: CSV import and validation
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod ingest;
pub mod models;
pub mod report;
pub mod sets;
pub mod storage;

pub use models::*;
