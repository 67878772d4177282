//! Factory for wallet verification records.

use entity::holder_verification;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::next_wallet;

/// Factory for building wallet verification records with custom values.
pub struct HolderVerificationFactory<'a> {
    db: &'a DatabaseConnection,
    wallet_address: String,
    guild_id: u64,
    discord_user_id: u64,
    nft_count: i64,
}

impl<'a> HolderVerificationFactory<'a> {
    /// Creates a new factory with a unique wallet and zero tokens.
    pub fn new(db: &'a DatabaseConnection, guild_id: u64, discord_user_id: u64) -> Self {
        Self {
            db,
            wallet_address: next_wallet(),
            guild_id,
            discord_user_id,
            nft_count: 0,
        }
    }

    /// Sets the wallet address. Stored exactly as given.
    pub fn wallet_address(mut self, address: impl Into<String>) -> Self {
        self.wallet_address = address.into();
        self
    }

    /// Sets the recorded token count.
    pub fn nft_count(mut self, nft_count: i64) -> Self {
        self.nft_count = nft_count;
        self
    }

    /// Builds and inserts the verification record.
    pub async fn build(self) -> Result<holder_verification::Model, DbErr> {
        holder_verification::ActiveModel {
            wallet_address: ActiveValue::Set(self.wallet_address),
            guild_id: ActiveValue::Set(self.guild_id.to_string()),
            discord_user_id: ActiveValue::Set(self.discord_user_id.to_string()),
            nft_count: ActiveValue::Set(self.nft_count),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a verification record for a unique wallet.
///
/// # Arguments
/// - `db` - Database connection for inserting the entity
/// - `guild_id` - Discord guild ID
/// - `discord_user_id` - Discord user owning the wallet
/// - `nft_count` - Recorded token count
///
/// # Returns
/// - `Ok(Model)` - The created record
/// - `Err(DbErr)` - Database error during insertion
pub async fn create_verification(
    db: &DatabaseConnection,
    guild_id: u64,
    discord_user_id: u64,
    nft_count: i64,
) -> Result<holder_verification::Model, DbErr> {
    HolderVerificationFactory::new(db, guild_id, discord_user_id)
        .nft_count(nft_count)
        .build()
        .await
}
