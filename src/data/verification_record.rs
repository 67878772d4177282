//! Wallet verification record repository.
//!
//! Records are keyed by `(wallet_address, guild_id)`. Addresses are lower-cased on every
//! read and write so that differently-cased submissions of the same wallet share one row.

use sea_orm::{sea_query::OnConflict, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::{
    error::AppError,
    model::verification_record::{UpsertVerificationRecordParam, VerificationRecord},
    util::parse::normalize_wallet,
};

/// Upper bound on bound parameters per `IN (...)` query.
const WALLET_QUERY_CHUNK: usize = 500;

/// Repository providing database operations for wallet verification records.
pub struct VerificationRecordRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> VerificationRecordRepository<'a> {
    /// Creates a new VerificationRecordRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts or updates the record for a wallet in a guild.
    ///
    /// On conflict the wallet is re-linked to the submitting user and its count replaced,
    /// so the latest successful check always wins.
    ///
    /// # Arguments
    /// - `param` - Wallet, guild, user and fresh token count
    ///
    /// # Returns
    /// - `Ok(VerificationRecord)` - The stored record with a normalized address
    /// - `Err(AppError)` - Database error during insert or update
    pub async fn upsert(
        &self,
        param: UpsertVerificationRecordParam,
    ) -> Result<VerificationRecord, AppError> {
        let wallet_address = normalize_wallet(&param.wallet_address);

        entity::prelude::HolderVerification::insert(entity::holder_verification::ActiveModel {
            wallet_address: ActiveValue::Set(wallet_address.clone()),
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            discord_user_id: ActiveValue::Set(param.discord_user_id.to_string()),
            nft_count: ActiveValue::Set(param.nft_count as i64),
        })
        .on_conflict(
            OnConflict::columns([
                entity::holder_verification::Column::WalletAddress,
                entity::holder_verification::Column::GuildId,
            ])
            .update_columns([
                entity::holder_verification::Column::DiscordUserId,
                entity::holder_verification::Column::NftCount,
            ])
            .to_owned(),
        )
        .exec_without_returning(self.db)
        .await?;

        Ok(VerificationRecord {
            wallet_address,
            guild_id: param.guild_id,
            discord_user_id: param.discord_user_id,
            nft_count: param.nft_count,
        })
    }

    /// Gets the record of a single wallet within a guild.
    ///
    /// # Returns
    /// - `Ok(Some(VerificationRecord))` - The wallet is linked to a user
    /// - `Ok(None)` - The wallet has never been verified in this guild
    /// - `Err(AppError)` - Database error or unparsable stored id
    pub async fn find_by_wallet(
        &self,
        wallet_address: &str,
        guild_id: u64,
    ) -> Result<Option<VerificationRecord>, AppError> {
        entity::prelude::HolderVerification::find_by_id((
            normalize_wallet(wallet_address),
            guild_id.to_string(),
        ))
        .one(self.db)
        .await?
        .map(VerificationRecord::from_entity)
        .transpose()
    }

    /// Gets the records of the given wallets within a guild.
    ///
    /// Input addresses are normalized before matching; wallets without a record are
    /// absent from the result. Large inputs are queried in chunks.
    ///
    /// # Arguments
    /// - `wallet_addresses` - Wallets to look up, in any case
    /// - `guild_id` - Guild to scope the lookup to
    ///
    /// # Returns
    /// - `Ok(Vec<VerificationRecord>)` - Matching records
    /// - `Err(AppError)` - Database error or unparsable stored id
    pub async fn get_by_wallets(
        &self,
        wallet_addresses: &[String],
        guild_id: u64,
    ) -> Result<Vec<VerificationRecord>, AppError> {
        let normalized: Vec<String> = wallet_addresses
            .iter()
            .map(|address| normalize_wallet(address))
            .collect();

        let mut records = Vec::new();
        for chunk in normalized.chunks(WALLET_QUERY_CHUNK) {
            let entities = entity::prelude::HolderVerification::find()
                .filter(entity::holder_verification::Column::GuildId.eq(guild_id.to_string()))
                .filter(
                    entity::holder_verification::Column::WalletAddress.is_in(chunk.iter().cloned()),
                )
                .all(self.db)
                .await?;

            for entity in entities {
                records.push(VerificationRecord::from_entity(entity)?);
            }
        }

        Ok(records)
    }

    /// Gets every wallet record a user has linked in a guild.
    ///
    /// # Returns
    /// - `Ok(Vec<VerificationRecord>)` - The user's records (empty if none)
    /// - `Err(AppError)` - Database error or unparsable stored id
    pub async fn get_by_user(
        &self,
        discord_user_id: u64,
        guild_id: u64,
    ) -> Result<Vec<VerificationRecord>, AppError> {
        entity::prelude::HolderVerification::find()
            .filter(
                entity::holder_verification::Column::DiscordUserId.eq(discord_user_id.to_string()),
            )
            .filter(entity::holder_verification::Column::GuildId.eq(guild_id.to_string()))
            .all(self.db)
            .await?
            .into_iter()
            .map(VerificationRecord::from_entity)
            .collect()
    }

    /// Sums the token counts across all of a user's wallets in a guild.
    ///
    /// # Returns
    /// - `Ok(u64)` - Total tokens (0 when the user has no records)
    /// - `Err(AppError)` - Database error or unparsable stored id
    pub async fn total_nft_count_by_user(
        &self,
        discord_user_id: u64,
        guild_id: u64,
    ) -> Result<u64, AppError> {
        let records = self.get_by_user(discord_user_id, guild_id).await?;

        Ok(records.iter().map(|record| record.nft_count).sum())
    }
}
