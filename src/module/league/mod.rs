//! Rolskanet league module
//!
//! Fetches the league calendar and ranking pages from rolskanet.fr,
//! classifies their table rows into typed records, and keeps the latest
//! snapshot of each in memory for the API layer.

pub mod cache;
pub mod classifier;
pub mod extractor;
pub mod fetcher;
pub mod manager;
pub mod types;
pub mod updater;

pub use fetcher::{FetchError, FetchMode, FetchStrategy, PageFetcher};
pub use manager::{LeagueManager, RefreshReport};
pub use types::{MatchRecord, RankingEntry, Snapshot, find_next_match};
pub use updater::LeagueUpdater;
