//! Components shared by the scheduler and verification entry points.
//!
//! `AppState` is built once in `main` after the database, the ownership client, the
//! verification queue and the Discord gateway are initialized. Every field is cheap to
//! clone, so each consumer (the cron job, command handlers) holds its own copy.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::service::{
    gateway::GuildGateway, ownership::OwnershipClient, reconcile::HolderReconcileService,
    user_lock::UserLocks, verification::HolderVerificationService,
    verification_queue::VerificationQueue,
};

#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: DatabaseConnection,

    /// Discord role operations.
    pub gateway: Arc<dyn GuildGateway>,

    /// Ownership client used for holder listings during reconciliation.
    pub ownership: Arc<OwnershipClient>,

    /// Started verification queue. Single-wallet checks must go through it.
    pub queue: Arc<VerificationQueue>,

    /// Per-member locks shared by verification and reconciliation.
    pub locks: Arc<UserLocks>,

    /// Fan-out cap for reconciliation batches.
    pub reconcile_batch_size: usize,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        gateway: Arc<dyn GuildGateway>,
        ownership: Arc<OwnershipClient>,
        queue: Arc<VerificationQueue>,
        reconcile_batch_size: usize,
    ) -> Self {
        Self {
            db,
            gateway,
            ownership,
            queue,
            locks: Arc::new(UserLocks::new()),
            reconcile_batch_size,
        }
    }

    pub fn verification_service(&self) -> HolderVerificationService<'_> {
        HolderVerificationService::new(
            &self.db,
            self.gateway.as_ref(),
            &self.queue,
            &self.locks,
        )
    }

    pub fn reconcile_service(&self) -> HolderReconcileService<'_> {
        HolderReconcileService::new(
            &self.db,
            self.gateway.as_ref(),
            &self.ownership,
            &self.locks,
            self.reconcile_batch_size,
        )
    }
}
