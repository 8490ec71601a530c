//! Deferred settlement
//!
//! Payment initiation schedules a cancellable task that moves the claim
//! from `PaymentProcessing` to `Settled` after a fixed delay. The tasks
//! are tied to process lifetime through a shutdown signal: a graceful
//! shutdown drains pending settlements immediately rather than dropping
//! them, and the transition itself is idempotent.

use claimflow_model::{ClaimId, ClaimStatus};
use claimflow_store::{RecordStore, StoreError};
use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Tracks in-flight settlement tasks, one per claim.
#[derive(Debug)]
pub struct SettlementScheduler {
    tasks: Arc<DashMap<ClaimId, JoinHandle<()>>>,
    shutdown: watch::Sender<bool>,
}

impl SettlementScheduler {
    /// New scheduler with no pending settlements
    #[must_use]
    pub fn new() -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            tasks: Arc::new(DashMap::new()),
            shutdown,
        }
    }

    /// Schedule a claim for settlement after `delay`.
    pub fn schedule(&self, store: Arc<dyn RecordStore>, claim_id: ClaimId, delay: Duration) {
        let mut shutdown_rx = self.shutdown.subscribe();
        let tasks = Arc::clone(&self.tasks);
        let id = claim_id.clone();

        let handle = tokio::spawn(async move {
            tokio::select! {
                () = tokio::time::sleep(delay) => {}
                // Shutdown settles now instead of abandoning the claim.
                _ = shutdown_rx.changed() => {}
            }
            if let Err(e) = settle(store.as_ref(), &id).await {
                tracing::error!(claim = %id, error = %e, "settlement failed");
            }
            tasks.remove(&id);
        });

        self.tasks.insert(claim_id, handle);
    }

    /// Number of settlements still pending
    #[inline]
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Signal shutdown and wait for every pending settlement to complete.
    pub async fn shutdown(&self) {
        let _ = self.shutdown.send(true);

        let ids: Vec<ClaimId> = self.tasks.iter().map(|e| e.key().clone()).collect();
        for id in ids {
            if let Some((_, handle)) = self.tasks.remove(&id) {
                let _ = handle.await;
            }
        }
    }
}

impl Default for SettlementScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Move a claim from `PaymentProcessing` to `Settled`. A no-op for any
/// other status, which makes replays after restart safe.
pub(crate) async fn settle(store: &dyn RecordStore, id: &ClaimId) -> Result<(), StoreError> {
    let updated = store
        .update_claim(
            id,
            Box::new(|claim| {
                if claim.status == ClaimStatus::PaymentProcessing {
                    claim.status = ClaimStatus::Settled;
                    claim.updated_at = Utc::now();
                }
            }),
        )
        .await?;

    if updated.status == ClaimStatus::Settled {
        tracing::info!(claim = %id, amount = updated.claim_amount, "claim settled");
    }
    Ok(())
}
