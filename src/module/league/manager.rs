//! League data manager
//!
//! Owns the fetcher and the per-kind snapshot cells, and runs the
//! fetch -> extract -> classify -> publish cycle for each data kind.

use anyhow::Result;
use std::time::Instant;
use tracing::{error, info, warn};

use super::cache::{CachedView, SnapshotCell};
use super::classifier::{parse_calendar, parse_ranking};
use super::fetcher::{FetchStrategy, PageFetcher};
use super::types::{MatchRecord, RankingEntry, Snapshot};

/// Outcome of one full refresh cycle. A `None` count means that kind
/// failed and kept its previous snapshot.
#[derive(Debug, Clone)]
pub struct RefreshReport {
    pub calendar_rows: Option<usize>,
    pub ranking_rows: Option<usize>,
    pub duration_seconds: f64,
}

pub struct LeagueManager {
    fetcher: PageFetcher,
    strategy: FetchStrategy,
    calendar_url: String,
    ranking_url: String,
    calendar: SnapshotCell<MatchRecord>,
    ranking: SnapshotCell<RankingEntry>,
}

impl LeagueManager {
    pub fn new(
        fetcher: PageFetcher,
        strategy: FetchStrategy,
        calendar_url: String,
        ranking_url: String,
    ) -> Self {
        Self {
            fetcher,
            strategy,
            calendar_url,
            ranking_url,
            calendar: SnapshotCell::new(),
            ranking: SnapshotCell::new(),
        }
    }

    /// Scrape the match calendar and publish a fresh snapshot.
    pub async fn refresh_calendar(&self) -> Result<usize> {
        let html = self
            .fetcher
            .fetch_with_strategy(&self.calendar_url, self.strategy)
            .await?;

        let records = parse_calendar(&html);
        if records.is_empty() {
            warn!("Calendar scrape of {} matched no rows", self.calendar_url);
        }

        let count = records.len();
        self.calendar.publish(Snapshot::now(records)).await;
        info!("Calendar refreshed: {} matches", count);
        Ok(count)
    }

    /// Scrape the standings table and publish a fresh snapshot.
    pub async fn refresh_ranking(&self) -> Result<usize> {
        let html = self
            .fetcher
            .fetch_with_strategy(&self.ranking_url, self.strategy)
            .await?;

        let records = parse_ranking(&html);
        if records.is_empty() {
            warn!("Ranking scrape of {} matched no rows", self.ranking_url);
        }

        let count = records.len();
        self.ranking.publish(Snapshot::now(records)).await;
        info!("Ranking refreshed: {} entries", count);
        Ok(count)
    }

    /// Refresh both data kinds. A failed kind is logged and its cell marked
    /// stale; the previous snapshot stays in place for readers.
    pub async fn refresh_all(&self) -> RefreshReport {
        let started = Instant::now();

        let calendar_rows = match self.refresh_calendar().await {
            Ok(count) => Some(count),
            Err(e) => {
                error!("Calendar refresh failed: {:#}", e);
                self.calendar.mark_stale().await;
                None
            }
        };

        let ranking_rows = match self.refresh_ranking().await {
            Ok(count) => Some(count),
            Err(e) => {
                error!("Ranking refresh failed: {:#}", e);
                self.ranking.mark_stale().await;
                None
            }
        };

        RefreshReport {
            calendar_rows,
            ranking_rows,
            duration_seconds: started.elapsed().as_secs_f64(),
        }
    }

    /// Latest cached calendar, empty until the first successful scrape.
    pub async fn calendar(&self) -> CachedView<MatchRecord> {
        self.calendar.read().await
    }

    /// Latest cached standings, empty until the first successful scrape.
    pub async fn ranking(&self) -> CachedView<RankingEntry> {
        self.ranking.read().await
    }
}
