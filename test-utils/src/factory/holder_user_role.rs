//! Factory for assigned holder roles.

use entity::holder_user_role;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Records that a user currently holds a tier role in a guild.
///
/// # Arguments
/// - `db` - Database connection for inserting the entity
/// - `discord_user_id` - Discord user ID
/// - `guild_id` - Discord guild ID
/// - `role_id` - Discord role ID currently held
///
/// # Returns
/// - `Ok(Model)` - The created assignment
/// - `Err(DbErr)` - Database error during insertion
pub async fn create_user_role(
    db: &DatabaseConnection,
    discord_user_id: u64,
    guild_id: u64,
    role_id: u64,
) -> Result<holder_user_role::Model, DbErr> {
    holder_user_role::ActiveModel {
        discord_user_id: ActiveValue::Set(discord_user_id.to_string()),
        guild_id: ActiveValue::Set(guild_id.to_string()),
        role_id: ActiveValue::Set(role_id.to_string()),
    }
    .insert(db)
    .await
}

