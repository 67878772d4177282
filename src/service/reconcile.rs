//! Collection-wide holder role reconciliation.
//!
//! A pass lists every current holder of a guild's collection, matches the holders against
//! wallets users have already verified, refreshes those users' stored counts and moves
//! each user to the tier their new total resolves to. Wallets nobody has verified are
//! ignored.
//!
//! Per-user updates run concurrently in fixed-size batches; a batch finishes completely
//! before the next one starts. Each update reports its own outcome, so one failure never
//! cancels its siblings.

use std::collections::BTreeMap;

use futures::future::join_all;
use sea_orm::DatabaseConnection;

use crate::{
    data::{
        verification_config::VerificationConfigRepository,
        verification_record::VerificationRecordRepository,
    },
    error::AppError,
    model::{
        reconcile::{ReconcileSummary, RoleChange, UpdateOutcome},
        verification_config::VerificationConfig,
        verification_record::UpsertVerificationRecordParam,
    },
    service::{
        gateway::GuildGateway, ownership::OwnershipClient, role_assignment::RoleAssignmentService,
        tier::resolve_tier, user_lock::UserLocks,
    },
};

pub struct HolderReconcileService<'a> {
    db: &'a DatabaseConnection,
    gateway: &'a dyn GuildGateway,
    ownership: &'a OwnershipClient,
    locks: &'a UserLocks,
    batch_size: usize,
}

impl<'a> HolderReconcileService<'a> {
    /// Creates a reconcile service.
    ///
    /// # Arguments
    /// - `db` - Database connection
    /// - `gateway` - Discord role operations
    /// - `ownership` - Ownership client used to list holders
    /// - `locks` - Per-member locks shared with on-demand verification
    /// - `batch_size` - Maximum number of concurrent per-user updates (at least 1)
    pub fn new(
        db: &'a DatabaseConnection,
        gateway: &'a dyn GuildGateway,
        ownership: &'a OwnershipClient,
        locks: &'a UserLocks,
        batch_size: usize,
    ) -> Self {
        Self {
            db,
            gateway,
            ownership,
            locks,
            batch_size: batch_size.max(1),
        }
    }

    /// Reconciles holder roles for one guild.
    ///
    /// Never fails: an unconfigured guild or an error before the updates start is logged
    /// and yields an empty summary. `summary.attempted` is the number of users an update
    /// was attempted for, not the number of role changes.
    pub async fn reconcile(&self, guild_id: u64) -> ReconcileSummary {
        let config_repo = VerificationConfigRepository::new(self.db);

        let config = match config_repo.find_by_guild_id(guild_id).await {
            Ok(Some(config)) => config,
            Ok(None) => {
                tracing::error!("No holder verification configured for guild {}", guild_id);
                return ReconcileSummary::default();
            }
            Err(e) => {
                tracing::error!(
                    "Failed to load holder verification config for guild {}: {}",
                    guild_id,
                    e
                );
                return ReconcileSummary::default();
            }
        };

        self.reconcile_config(&config).await
    }

    /// Runs a reconciliation pass for every configured guild, one guild at a time.
    ///
    /// # Returns
    /// - `Ok(Vec<(u64, ReconcileSummary)>)` - Summary per guild id
    /// - `Err(AppError)` - The configurations could not be loaded
    pub async fn reconcile_all(&self) -> Result<Vec<(u64, ReconcileSummary)>, AppError> {
        let configs = VerificationConfigRepository::new(self.db).get_all().await?;

        let mut summaries = Vec::with_capacity(configs.len());
        for config in configs {
            let summary = self.reconcile_config(&config).await;
            summaries.push((config.guild_id, summary));
        }

        Ok(summaries)
    }

    async fn reconcile_config(&self, config: &VerificationConfig) -> ReconcileSummary {
        match self.try_reconcile_config(config).await {
            Ok(summary) => {
                tracing::info!(
                    "Holder reconciliation for guild {} finished: {} attempted, {} changed, {} unchanged, {} skipped, {} failed",
                    config.guild_id,
                    summary.attempted,
                    summary.changed,
                    summary.unchanged,
                    summary.skipped,
                    summary.failed
                );
                summary
            }
            Err(e) => {
                tracing::error!(
                    "Holder reconciliation for guild {} failed: {}",
                    config.guild_id,
                    e
                );
                ReconcileSummary::default()
            }
        }
    }

    async fn try_reconcile_config(
        &self,
        config: &VerificationConfig,
    ) -> Result<ReconcileSummary, AppError> {
        let snapshot = self
            .ownership
            .get_all_holders(&config.collection_address)
            .await;

        let mut summary = ReconcileSummary {
            complete_snapshot: snapshot.complete,
            ..Default::default()
        };

        if !snapshot.complete {
            tracing::warn!(
                "Holder listing for guild {} is incomplete ({} holders fetched); only fetched wallets will be updated",
                config.guild_id,
                snapshot.len()
            );
        }

        if snapshot.is_empty() {
            return Ok(summary);
        }

        let wallets: Vec<String> = snapshot.holders.keys().cloned().collect();
        let records = VerificationRecordRepository::new(self.db)
            .get_by_wallets(&wallets, config.guild_id)
            .await?;

        // Group by user so no two concurrent updates touch the same user's rows.
        let mut wallets_by_user: BTreeMap<u64, Vec<(String, u64)>> = BTreeMap::new();
        for record in records {
            if let Some(&nft_count) = snapshot.holders.get(&record.wallet_address) {
                wallets_by_user
                    .entry(record.discord_user_id)
                    .or_default()
                    .push((record.wallet_address, nft_count));
            }
        }

        let updates: Vec<(u64, Vec<(String, u64)>)> = wallets_by_user.into_iter().collect();
        for batch in updates.chunks(self.batch_size) {
            let outcomes = join_all(
                batch
                    .iter()
                    .map(|(user_id, wallets)| self.update_user(config, *user_id, wallets)),
            )
            .await;

            for outcome in &outcomes {
                summary.record(outcome);
            }
        }

        Ok(summary)
    }

    async fn update_user(
        &self,
        config: &VerificationConfig,
        user_id: u64,
        wallets: &[(String, u64)],
    ) -> UpdateOutcome {
        match self.try_update_user(config, user_id, wallets).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(
                    "Failed to update holder role for user {} in guild {}: {}",
                    user_id,
                    config.guild_id,
                    e
                );
                UpdateOutcome::Failed(e.to_string())
            }
        }
    }

    async fn try_update_user(
        &self,
        config: &VerificationConfig,
        user_id: u64,
        wallets: &[(String, u64)],
    ) -> Result<UpdateOutcome, AppError> {
        let Some(member) = self.gateway.resolve_member(config.guild_id, user_id).await else {
            tracing::warn!(
                "User {} not found in guild {}; skipping holder role update",
                user_id,
                config.guild_id
            );
            return Ok(UpdateOutcome::Skipped);
        };

        let _guard = self.locks.lock(config.guild_id, user_id).await;
        let record_repo = VerificationRecordRepository::new(self.db);

        // Store fresh counts first so the total reflects this snapshot.
        for (wallet_address, nft_count) in wallets {
            record_repo
                .upsert(UpsertVerificationRecordParam {
                    wallet_address: wallet_address.clone(),
                    guild_id: config.guild_id,
                    discord_user_id: user_id,
                    nft_count: *nft_count,
                })
                .await?;
        }

        let total = record_repo
            .total_nft_count_by_user(user_id, config.guild_id)
            .await?;
        let new_role = resolve_tier(config, total);

        let change = RoleAssignmentService::new(self.db, self.gateway)
            .apply(&member, new_role)
            .await?;

        Ok(match change {
            RoleChange::Unchanged => UpdateOutcome::Unchanged,
            RoleChange::Changed { .. } => UpdateOutcome::Changed,
        })
    }
}
