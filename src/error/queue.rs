use thiserror::Error;

/// Failures of the verification task queue.
#[derive(Error, Debug)]
pub enum QueueError {
    /// The worker has been shut down and no longer accepts tasks.
    #[error("Verification worker is not accepting tasks")]
    Closed,

    /// The worker stopped before signaling the task's completion.
    #[error("Verification worker stopped before completing the check for {wallet}")]
    Dropped {
        /// Wallet whose check was abandoned
        wallet: String,
    },
}
