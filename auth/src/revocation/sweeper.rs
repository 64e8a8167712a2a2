use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use super::RevocationError;
use super::RevocationStore;
use crate::clock::Clock;

/// Background task that prunes revocation entries once their token has
/// expired on its own.
pub struct RevocationSweeper<S: RevocationStore> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    interval: Duration,
}

impl<S: RevocationStore> RevocationSweeper<S> {
    /// Create a sweeper for `store` running every `interval`.
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>, interval: Duration) -> Self {
        Self {
            store,
            clock,
            interval,
        }
    }

    /// Run a single sweep.
    ///
    /// # Returns
    /// Number of entries removed
    pub async fn run_once(&self) -> Result<usize, RevocationError> {
        let purged = self.store.purge_expired(self.clock.now()).await?;
        if purged > 0 {
            tracing::info!(purged, "Pruned expired revocation entries");
        }
        Ok(purged)
    }

    /// Start sweeping in a tokio task.
    ///
    /// Failed sweeps are logged and retried on the next tick. Abort the
    /// returned handle to stop the task.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            tracing::info!(
                interval_secs = self.interval.as_secs(),
                "Revocation sweeper started"
            );

            let mut ticker = tokio::time::interval(self.interval);
            // The first tick completes immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;
                if let Err(e) = self.run_once().await {
                    tracing::error!(error = %e, "Revocation sweep failed");
                }
            }
        })
    }
}
