//! Holder verification configuration repository.
//!
//! A guild's configuration is a single `holder_verification_config` row plus its
//! `holder_role_threshold` rows. Saving replaces both wholesale inside one transaction so
//! readers never observe a config with a partial tier list.

use sea_orm::{
    sea_query::OnConflict, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};

use crate::{
    error::AppError,
    model::verification_config::{SaveVerificationConfigParam, VerificationConfig},
    util::parse::normalize_wallet,
};

/// Repository providing database operations for verification configurations.
pub struct VerificationConfigRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> VerificationConfigRepository<'a> {
    /// Creates a new VerificationConfigRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds the configuration of a guild together with its tiers.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    ///
    /// # Returns
    /// - `Ok(Some(VerificationConfig))` - Guild is configured; tiers sorted by `min_count`
    /// - `Ok(None)` - Guild has no verification configuration
    /// - `Err(AppError)` - Database error or unparsable stored id
    pub async fn find_by_guild_id(
        &self,
        guild_id: u64,
    ) -> Result<Option<VerificationConfig>, AppError> {
        let Some(config) =
            entity::prelude::HolderVerificationConfig::find_by_id(guild_id.to_string())
                .one(self.db)
                .await?
        else {
            return Ok(None);
        };

        let thresholds = entity::prelude::HolderRoleThreshold::find()
            .filter(entity::holder_role_threshold::Column::GuildId.eq(config.guild_id.as_str()))
            .order_by_asc(entity::holder_role_threshold::Column::MinNft)
            .all(self.db)
            .await?;

        Ok(Some(VerificationConfig::from_entity(config, thresholds)?))
    }

    /// Gets every configured guild with its tiers.
    ///
    /// Used by the scheduled reconciliation to know which guilds to process.
    ///
    /// # Returns
    /// - `Ok(Vec<VerificationConfig>)` - All configurations (empty if none)
    /// - `Err(AppError)` - Database error or unparsable stored id
    pub async fn get_all(&self) -> Result<Vec<VerificationConfig>, AppError> {
        let configs = entity::prelude::HolderVerificationConfig::find()
            .find_with_related(entity::prelude::HolderRoleThreshold)
            .all(self.db)
            .await?;

        configs
            .into_iter()
            .map(|(config, thresholds)| VerificationConfig::from_entity(config, thresholds))
            .collect()
    }

    /// Gets only the tracked collection address of a guild.
    ///
    /// # Returns
    /// - `Ok(Some(String))` - Lower-cased collection address
    /// - `Ok(None)` - Guild is not configured
    /// - `Err(AppError)` - Database error
    pub async fn get_collection_address(&self, guild_id: u64) -> Result<Option<String>, AppError> {
        let config = entity::prelude::HolderVerificationConfig::find_by_id(guild_id.to_string())
            .one(self.db)
            .await?;

        Ok(config.map(|config| config.collection_address))
    }

    /// Creates or replaces a guild's configuration.
    ///
    /// Validates the tiers, then in a single transaction upserts the config row, deletes
    /// every existing threshold for the guild and inserts the new ones.
    ///
    /// # Arguments
    /// - `param` - Guild, collection address and complete tier list
    ///
    /// # Returns
    /// - `Ok(VerificationConfig)` - The stored configuration
    /// - `Err(AppError::BadRequest)` - Tier list failed validation
    /// - `Err(AppError::DbErr)` - Database error; nothing was changed
    pub async fn save(
        &self,
        param: SaveVerificationConfigParam,
    ) -> Result<VerificationConfig, AppError> {
        param.validate()?;

        let guild_id = param.guild_id.to_string();
        let collection_address = normalize_wallet(&param.collection_address);

        let txn = self.db.begin().await?;

        entity::prelude::HolderVerificationConfig::insert(
            entity::holder_verification_config::ActiveModel {
                guild_id: ActiveValue::Set(guild_id.clone()),
                collection_address: ActiveValue::Set(collection_address.clone()),
            },
        )
        .on_conflict(
            OnConflict::column(entity::holder_verification_config::Column::GuildId)
                .update_column(entity::holder_verification_config::Column::CollectionAddress)
                .to_owned(),
        )
        .exec_without_returning(&txn)
        .await?;

        entity::prelude::HolderRoleThreshold::delete_many()
            .filter(entity::holder_role_threshold::Column::GuildId.eq(guild_id.as_str()))
            .exec(&txn)
            .await?;

        let thresholds = param
            .tiers
            .iter()
            .map(|tier| entity::holder_role_threshold::ActiveModel {
                guild_id: ActiveValue::Set(guild_id.clone()),
                min_nft: ActiveValue::Set(tier.min_count as i64),
                max_nft: ActiveValue::Set(tier.max_count.map(|max| max as i64)),
                role_id: ActiveValue::Set(tier.role_id.to_string()),
                ..Default::default()
            })
            .collect::<Vec<_>>();

        entity::prelude::HolderRoleThreshold::insert_many(thresholds)
            .exec_without_returning(&txn)
            .await?;

        txn.commit().await?;

        let mut tiers = param.tiers;
        tiers.sort_by_key(|tier| tier.min_count);

        Ok(VerificationConfig {
            guild_id: param.guild_id,
            collection_address,
            tiers,
        })
    }

    /// Deletes a guild's configuration and all its tiers.
    ///
    /// # Returns
    /// - `Ok(())` - Configuration removed (or none existed)
    /// - `Err(AppError)` - Database error
    pub async fn delete(&self, guild_id: u64) -> Result<(), AppError> {
        let guild_id = guild_id.to_string();
        let txn = self.db.begin().await?;

        entity::prelude::HolderRoleThreshold::delete_many()
            .filter(entity::holder_role_threshold::Column::GuildId.eq(guild_id.as_str()))
            .exec(&txn)
            .await?;

        entity::prelude::HolderVerificationConfig::delete_by_id(guild_id)
            .exec(&txn)
            .await?;

        txn.commit().await?;

        Ok(())
    }
}
