//! Factory for holder verification configs and their role thresholds.

use entity::{holder_role_threshold, holder_verification_config};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::next_wallet;

/// Factory for creating a guild's verification config with customizable tiers.
///
/// Defaults to a random collection address and a single open-ended tier starting at
/// one token when no tiers are added explicitly.
pub struct VerificationConfigFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: u64,
    collection_address: String,
    tiers: Vec<(i64, Option<i64>, u64)>,
}

impl<'a> VerificationConfigFactory<'a> {
    /// Creates a new factory for the given guild.
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entities
    /// - `guild_id` - Discord guild ID the config belongs to
    pub fn new(db: &'a DatabaseConnection, guild_id: u64) -> Self {
        Self {
            db,
            guild_id,
            collection_address: next_wallet(),
            tiers: Vec::new(),
        }
    }

    /// Sets the tracked collection address.
    pub fn collection_address(mut self, address: impl Into<String>) -> Self {
        self.collection_address = address.into();
        self
    }

    /// Adds a role threshold `(min, max, role_id)`.
    pub fn tier(mut self, min_nft: i64, max_nft: Option<i64>, role_id: u64) -> Self {
        self.tiers.push((min_nft, max_nft, role_id));
        self
    }

    /// Builds and inserts the config row followed by its thresholds.
    ///
    /// # Returns
    /// - `Ok((config, thresholds))` - The created entities
    /// - `Err(DbErr)` - Database error during insertion
    pub async fn build(
        self,
    ) -> Result<
        (
            holder_verification_config::Model,
            Vec<holder_role_threshold::Model>,
        ),
        DbErr,
    > {
        let config = holder_verification_config::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id.to_string()),
            collection_address: ActiveValue::Set(self.collection_address),
        }
        .insert(self.db)
        .await?;

        let tiers = if self.tiers.is_empty() {
            vec![(1, None, crate::factory::helpers::next_id())]
        } else {
            self.tiers
        };

        let mut thresholds = Vec::with_capacity(tiers.len());
        for (min_nft, max_nft, role_id) in tiers {
            let threshold = holder_role_threshold::ActiveModel {
                guild_id: ActiveValue::Set(config.guild_id.clone()),
                min_nft: ActiveValue::Set(min_nft),
                max_nft: ActiveValue::Set(max_nft),
                role_id: ActiveValue::Set(role_id.to_string()),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
            thresholds.push(threshold);
        }

        Ok((config, thresholds))
    }
}

/// Creates a verification config with a default collection and a single tier.
///
/// # Arguments
/// - `db` - Database connection for inserting the entities
/// - `guild_id` - Discord guild ID the config belongs to
///
/// # Returns
/// - `Ok(Model)` - The created config row
/// - `Err(DbErr)` - Database error during insertion
pub async fn create_config(
    db: &DatabaseConnection,
    guild_id: u64,
) -> Result<holder_verification_config::Model, DbErr> {
    let (config, _) = VerificationConfigFactory::new(db, guild_id).build().await?;
    Ok(config)
}
