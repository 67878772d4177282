//! Serialized wallet ownership checks.
//!
//! Every on-demand check goes through a single background worker that pulls tasks off an
//! unbounded FIFO channel, performs one upstream lookup at a time and answers the caller
//! through a oneshot channel. The worker waits at least `call_interval` between two
//! upstream calls no matter how many callers are queued.

use std::{sync::Arc, time::Duration};

use tokio::{
    sync::{mpsc, oneshot, Mutex},
    task::JoinHandle,
    time::Instant,
};

use crate::{error::queue::QueueError, service::ownership::OwnershipClient};

/// A single pending ownership check.
struct VerificationTask {
    wallet_address: String,
    collection_address: String,
    responder: oneshot::Sender<u64>,
}

pub struct VerificationQueue {
    sender: mpsc::UnboundedSender<VerificationTask>,
    receiver: Mutex<Option<mpsc::UnboundedReceiver<VerificationTask>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
    ownership: Arc<OwnershipClient>,
    call_interval: Duration,
}

impl VerificationQueue {
    /// Creates a stopped queue. Tasks enqueued before `start` wait until the worker runs.
    ///
    /// # Arguments
    /// - `ownership` - Client used by the worker for every lookup
    /// - `call_interval` - Minimum time between two upstream calls
    pub fn new(ownership: Arc<OwnershipClient>, call_interval: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();

        Self {
            sender,
            receiver: Mutex::new(Some(receiver)),
            worker: Mutex::new(None),
            ownership,
            call_interval,
        }
    }

    /// Spawns the worker. Calling it again while the worker runs does nothing.
    pub async fn start(&self) {
        let mut worker = self.worker.lock().await;
        if worker.is_some() {
            tracing::debug!("Verification worker already started");
            return;
        }

        let Some(receiver) = self.receiver.lock().await.take() else {
            tracing::warn!("Verification worker cannot be restarted after shutdown");
            return;
        };

        let ownership = self.ownership.clone();
        let call_interval = self.call_interval;
        *worker = Some(tokio::spawn(run_worker(receiver, ownership, call_interval)));

        tracing::info!("Verification worker started");
    }

    /// Stops the worker.
    ///
    /// Callers still waiting on a task receive `QueueError::Dropped`; later calls to
    /// `enqueue` fail with `QueueError::Closed`.
    pub async fn shutdown(&self) {
        if let Some(handle) = self.worker.lock().await.take() {
            handle.abort();
            let _ = handle.await;
            tracing::info!("Verification worker stopped");
        }
    }

    pub async fn is_running(&self) -> bool {
        self.worker
            .lock()
            .await
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Queues an ownership check and waits for its result.
    ///
    /// Dropping the returned future does not cancel the check; the worker still performs
    /// it in order and discards the answer.
    ///
    /// # Arguments
    /// - `wallet_address` - Wallet to check
    /// - `collection_address` - Collection the wallet is checked against
    ///
    /// # Returns
    /// - `Ok(u64)` - Tokens held; `0` when the upstream lookup failed
    /// - `Err(QueueError)` - The worker is gone and the check will never run
    pub async fn enqueue(
        &self,
        wallet_address: &str,
        collection_address: &str,
    ) -> Result<u64, QueueError> {
        let (responder, result) = oneshot::channel();

        self.sender
            .send(VerificationTask {
                wallet_address: wallet_address.to_string(),
                collection_address: collection_address.to_string(),
                responder,
            })
            .map_err(|_| QueueError::Closed)?;

        result.await.map_err(|_| QueueError::Dropped {
            wallet: wallet_address.to_string(),
        })
    }
}

async fn run_worker(
    mut receiver: mpsc::UnboundedReceiver<VerificationTask>,
    ownership: Arc<OwnershipClient>,
    call_interval: Duration,
) {
    let mut last_call: Option<Instant> = None;

    while let Some(task) = receiver.recv().await {
        if let Some(last_call) = last_call {
            tokio::time::sleep_until(last_call + call_interval).await;
        }
        last_call = Some(Instant::now());

        tracing::debug!("Checking ownership for wallet {}", task.wallet_address);
        let nft_count = ownership
            .get_ownership_count(&task.wallet_address, &task.collection_address)
            .await;

        if task.responder.send(nft_count).is_err() {
            tracing::debug!(
                "Caller stopped waiting for wallet {}; result discarded",
                task.wallet_address
            );
        }
    }

    tracing::info!("Verification queue closed");
}
