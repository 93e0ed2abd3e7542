//! In-memory snapshot cache
//!
//! One cell per data kind holds the most recent successful scrape. The
//! whole snapshot is replaced under the write guard, never mutated field
//! by field, so concurrent readers always observe a complete scrape and a
//! failed refresh can never corrupt the previous one.

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::types::Snapshot;

/// Read-side view of a cell: the latest snapshot, if any, plus staleness.
#[derive(Debug, Clone)]
pub struct CachedView<T> {
    pub snapshot: Option<Snapshot<T>>,
    /// True when the most recent refresh attempt failed; the snapshot (or
    /// its absence) is then older than the interval suggests.
    pub stale: bool,
}

impl<T> CachedView<T> {
    /// Timestamp of the data actually being served.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.snapshot.as_ref().map(|s| s.fetched_at)
    }
}

/// Latest-snapshot cell for one data kind.
///
/// Lifecycle: initialized empty at startup, replaced wholesale per
/// successful scrape, read-only otherwise.
pub struct SnapshotCell<T> {
    state: RwLock<CellState<T>>,
}

struct CellState<T> {
    snapshot: Option<Snapshot<T>>,
    stale: bool,
}

impl<T: Clone> SnapshotCell<T> {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(CellState {
                snapshot: None,
                stale: false,
            }),
        }
    }

    /// Replace the cached snapshot wholesale and clear the stale flag.
    pub async fn publish(&self, snapshot: Snapshot<T>) {
        let mut state = self.state.write().await;
        state.snapshot = Some(snapshot);
        state.stale = false;
    }

    /// Flag the cell after a failed refresh. Cached records stay serveable.
    pub async fn mark_stale(&self) {
        self.state.write().await.stale = true;
    }

    pub async fn read(&self) -> CachedView<T> {
        let state = self.state.read().await;
        CachedView {
            snapshot: state.snapshot.clone(),
            stale: state.stale,
        }
    }
}

impl<T: Clone> Default for SnapshotCell<T> {
    fn default() -> Self {
        Self::new()
    }
}
