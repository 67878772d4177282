use sea_orm::DatabaseConnection;

use crate::{
    data::{
        verification_config::VerificationConfigRepository,
        verification_record::VerificationRecordRepository,
    },
    error::AppError,
    model::{
        verification_config::VerificationConfig,
        verification_record::UpsertVerificationRecordParam,
    },
    service::{
        gateway::GuildGateway, role_assignment::RoleAssignmentService, tier::resolve_tier,
        user_lock::UserLocks, verification_queue::VerificationQueue,
    },
    util::parse::{is_wallet_address, normalize_wallet},
};

/// On-demand verification of a single submitted wallet.
pub struct HolderVerificationService<'a> {
    db: &'a DatabaseConnection,
    gateway: &'a dyn GuildGateway,
    queue: &'a VerificationQueue,
    locks: &'a UserLocks,
}

impl<'a> HolderVerificationService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        gateway: &'a dyn GuildGateway,
        queue: &'a VerificationQueue,
        locks: &'a UserLocks,
    ) -> Self {
        Self {
            db,
            gateway,
            queue,
            locks,
        }
    }

    /// Verifies a wallet for a user and updates their holder role.
    ///
    /// The ownership check runs through the verification queue. The wallet's record is
    /// always stored with the returned count, even when it is zero, so the wallet is
    /// linked to the user for later reconciliation passes. Role work happens only when
    /// the user's total across all their wallets resolves to a tier.
    ///
    /// A wallet previously linked to another user moves to this user; the previous
    /// owner's tier is then recomputed without it.
    ///
    /// # Arguments
    /// - `wallet_address` - Wallet submitted by the user
    /// - `guild_id` - Guild the user is verifying in
    /// - `user_id` - Discord user ID
    ///
    /// # Returns
    /// - `Ok(true)` - A tier was resolved and applied
    /// - `Ok(false)` - The wallet holds nothing, the total matches no tier, or the user
    ///   could not be resolved in the guild
    /// - `Err(AppError::BadRequest)` - The address is not `0x` plus 40 hex digits
    /// - `Err(AppError::NotFound)` - The guild has no verification configuration
    /// - `Err(AppError)` - Queue or database error
    pub async fn verify(
        &self,
        wallet_address: &str,
        guild_id: u64,
        user_id: u64,
    ) -> Result<bool, AppError> {
        let wallet_address = normalize_wallet(wallet_address);
        if !is_wallet_address(&wallet_address) {
            return Err(AppError::BadRequest(format!(
                "Invalid wallet address: {}",
                wallet_address
            )));
        }

        let config = VerificationConfigRepository::new(self.db)
            .find_by_guild_id(guild_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No holder verification configured for guild {}",
                    guild_id
                ))
            })?;

        let nft_count = self
            .queue
            .enqueue(&wallet_address, &config.collection_address)
            .await?;

        let previous_owner = VerificationRecordRepository::new(self.db)
            .find_by_wallet(&wallet_address, guild_id)
            .await?
            .map(|record| record.discord_user_id)
            .filter(|owner| *owner != user_id);

        let verified = {
            let _guard = self.locks.lock(guild_id, user_id).await;
            self.apply_count(&config, wallet_address, user_id, nft_count)
                .await?
        };

        if let Some(previous_owner) = previous_owner {
            if let Err(e) = self.refresh_user(&config, previous_owner).await {
                tracing::error!(
                    "Failed to update holder role of previous wallet owner {} in guild {}: {}",
                    previous_owner,
                    guild_id,
                    e
                );
            }
        }

        Ok(verified)
    }

    async fn apply_count(
        &self,
        config: &VerificationConfig,
        wallet_address: String,
        user_id: u64,
        nft_count: u64,
    ) -> Result<bool, AppError> {
        let guild_id = config.guild_id;
        let record_repo = VerificationRecordRepository::new(self.db);
        let record = record_repo
            .upsert(UpsertVerificationRecordParam {
                wallet_address,
                guild_id,
                discord_user_id: user_id,
                nft_count,
            })
            .await?;

        if nft_count == 0 {
            tracing::info!(
                "Wallet {} holds no tokens; no holder role for user {} in guild {}",
                record.wallet_address,
                user_id,
                guild_id
            );
            return Ok(false);
        }

        let total = record_repo.total_nft_count_by_user(user_id, guild_id).await?;

        let Some(role_id) = resolve_tier(config, total) else {
            tracing::warn!(
                "No role tier matches {} tokens for user {} in guild {}",
                total,
                user_id,
                guild_id
            );
            return Ok(false);
        };

        let Some(member) = self.gateway.resolve_member(guild_id, user_id).await else {
            tracing::warn!(
                "User {} not found in guild {}; holder role not applied",
                user_id,
                guild_id
            );
            return Ok(false);
        };

        RoleAssignmentService::new(self.db, self.gateway)
            .apply(&member, Some(role_id))
            .await?;

        tracing::info!(
            "Verified wallet {} for user {} in guild {}: {} tokens total, role {}",
            record.wallet_address,
            user_id,
            guild_id,
            total,
            role_id
        );

        Ok(true)
    }

    /// Moves a user to the tier their remaining wallets resolve to.
    async fn refresh_user(&self, config: &VerificationConfig, user_id: u64) -> Result<(), AppError> {
        let _guard = self.locks.lock(config.guild_id, user_id).await;

        let total = VerificationRecordRepository::new(self.db)
            .total_nft_count_by_user(user_id, config.guild_id)
            .await?;
        let new_role = resolve_tier(config, total);

        let Some(member) = self.gateway.resolve_member(config.guild_id, user_id).await else {
            tracing::warn!(
                "Previous wallet owner {} not found in guild {}; holder role not updated",
                user_id,
                config.guild_id
            );
            return Ok(());
        };

        RoleAssignmentService::new(self.db, self.gateway)
            .apply(&member, new_role)
            .await?;

        Ok(())
    }
}
