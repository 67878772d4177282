//! Assigned holder role repository.
//!
//! Tracks the tier role the bot last granted each user so reconciliation can tell whether
//! a grant or revoke is needed without asking Discord.

use sea_orm::{sea_query::OnConflict, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::{error::AppError, model::assigned_role::AssignedRole};

/// Repository for the role currently assigned to each verified user.
pub struct AssignedRoleRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AssignedRoleRepository<'a> {
    /// Creates a new AssignedRoleRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the role currently assigned to a user in a guild.
    ///
    /// # Returns
    /// - `Ok(Some(AssignedRole))` - The user holds a tier role
    /// - `Ok(None)` - No role has been assigned yet
    /// - `Err(AppError)` - Database error or unparsable stored id
    pub async fn get_current(
        &self,
        discord_user_id: u64,
        guild_id: u64,
    ) -> Result<Option<AssignedRole>, AppError> {
        let entity = entity::prelude::HolderUserRole::find_by_id((
            discord_user_id.to_string(),
            guild_id.to_string(),
        ))
        .one(self.db)
        .await?;

        entity.map(AssignedRole::from_entity).transpose()
    }

    /// Records the role now assigned to a user.
    ///
    /// `Some(role_id)` inserts or replaces the assignment; `None` removes it, returning
    /// the user to the "no role" state.
    ///
    /// # Arguments
    /// - `discord_user_id` - Discord user ID
    /// - `guild_id` - Discord guild ID
    /// - `role_id` - The new role, or `None` when the user no longer qualifies
    ///
    /// # Returns
    /// - `Ok(())` - Assignment stored
    /// - `Err(AppError)` - Database error
    pub async fn set_current(
        &self,
        discord_user_id: u64,
        guild_id: u64,
        role_id: Option<u64>,
    ) -> Result<(), AppError> {
        match role_id {
            Some(role_id) => {
                entity::prelude::HolderUserRole::insert(entity::holder_user_role::ActiveModel {
                    discord_user_id: ActiveValue::Set(discord_user_id.to_string()),
                    guild_id: ActiveValue::Set(guild_id.to_string()),
                    role_id: ActiveValue::Set(role_id.to_string()),
                })
                .on_conflict(
                    OnConflict::columns([
                        entity::holder_user_role::Column::DiscordUserId,
                        entity::holder_user_role::Column::GuildId,
                    ])
                    .update_column(entity::holder_user_role::Column::RoleId)
                    .to_owned(),
                )
                .exec_without_returning(self.db)
                .await?;
            }
            None => {
                entity::prelude::HolderUserRole::delete_many()
                    .filter(
                        entity::holder_user_role::Column::DiscordUserId
                            .eq(discord_user_id.to_string()),
                    )
                    .filter(entity::holder_user_role::Column::GuildId.eq(guild_id.to_string()))
                    .exec(self.db)
                    .await?;
            }
        }

        Ok(())
    }
}
