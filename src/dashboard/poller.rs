//! Self-rescheduling poll loop for one collection

use super::controller::{Collection, DashboardEvent, Snapshot};
use crate::api::ApiError;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, RwLock};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Polls one collection and writes it into its slot of the snapshot.
///
/// Each loop is the only writer of its slot. The next fetch starts
/// `interval` after the previous one settled, so cycles never overlap.
pub(crate) struct PollLoop<T> {
    pub collection: Collection,
    pub state: Arc<RwLock<Snapshot>>,
    pub slot: fn(&mut Snapshot) -> &mut Vec<T>,
    pub interval: Duration,
    pub events: mpsc::UnboundedSender<DashboardEvent>,
    pub cancel: CancellationToken,
}

impl<T> PollLoop<T> {
    pub async fn run<F, Fut>(self, mut fetch: F)
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Vec<T>, ApiError>>,
    {
        info!("[POLL] Polling {} every {:?}", self.collection, self.interval);

        loop {
            let result = tokio::select! {
                _ = self.cancel.cancelled() => break,
                result = fetch() => result,
            };

            let event = match result {
                Ok(items) => {
                    let count = items.len();
                    {
                        let mut state = self.state.write().await;
                        *(self.slot)(&mut *state) = items;
                    }
                    debug!("[POLL] {} snapshot replaced ({} items)", self.collection, count);
                    DashboardEvent::SnapshotUpdated {
                        collection: self.collection,
                        count,
                    }
                }
                Err(e) => {
                    // Previous snapshot stays on screen
                    warn!("[POLL] {} fetch failed: {}", self.collection, e);
                    DashboardEvent::FetchFailed {
                        collection: self.collection,
                        reason: e.to_string(),
                    }
                }
            };
            let _ = self.events.send(event);

            tokio::select! {
                _ = self.cancel.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        info!("[POLL] {} polling stopped", self.collection);
    }
}
