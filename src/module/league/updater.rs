//! Scheduled refresh
//!
//! Runs one refresh at startup and then refreshes both data kinds on a
//! fixed interval. A failed cycle leaves the previous snapshots in place;
//! the next cycle starts fresh, with no in-between retries.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::manager::LeagueManager;

/// Upper bound for one refresh cycle, covering both pages and a possible
/// browser fallback per page.
const CYCLE_TIMEOUT_SECONDS: u64 = 180;

/// League updater - drives the manager on a schedule.
pub struct LeagueUpdater {
    manager: Arc<LeagueManager>,
    interval: Duration,
}

impl LeagueUpdater {
    pub fn new(manager: Arc<LeagueManager>, interval_minutes: u64) -> Self {
        Self {
            manager,
            interval: Duration::from_secs(interval_minutes * 60),
        }
    }

    /// Refresh once immediately, then keep refreshing on the interval.
    ///
    /// Returns the JoinHandle of the background task.
    pub async fn start_with_initial_update(self) -> JoinHandle<()> {
        info!("Starting league updater (initial refresh + schedule)");

        self.run_cycle().await;

        tokio::spawn(async move {
            self.run_scheduled_loop().await;
        })
    }

    /// Start the interval loop without an immediate refresh.
    pub async fn start(self) -> JoinHandle<()> {
        info!("Starting league updater (scheduled only)");

        tokio::spawn(async move {
            self.run_scheduled_loop().await;
        })
    }

    async fn run_scheduled_loop(&self) {
        loop {
            info!(
                "Next league refresh in {:.1} minutes",
                self.interval.as_secs_f64() / 60.0
            );
            tokio::time::sleep(self.interval).await;

            self.run_cycle().await;
        }
    }

    /// One bounded refresh cycle. Failures are logged, never fatal.
    async fn run_cycle(&self) {
        let cycle = tokio::time::timeout(
            Duration::from_secs(CYCLE_TIMEOUT_SECONDS),
            self.manager.refresh_all(),
        )
        .await;

        match cycle {
            Ok(report) => match (report.calendar_rows, report.ranking_rows) {
                (Some(matches), Some(entries)) => {
                    info!(
                        "League refresh completed: {} matches, {} ranking entries, {:.2}s",
                        matches, entries, report.duration_seconds
                    );
                }
                (calendar, ranking) => {
                    warn!(
                        "League refresh finished with failures: calendar {:?}, ranking {:?}",
                        calendar, ranking
                    );
                }
            },
            Err(_) => {
                error!(
                    "League refresh timed out after {}s, keeping previous snapshots",
                    CYCLE_TIMEOUT_SECONDS
                );
            }
        }
    }
}
