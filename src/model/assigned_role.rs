use crate::{error::AppError, util::parse::parse_u64_from_string};

/// The tier role the bot last granted a user in a guild.
///
/// Absent until the first grant. Compared against the freshly resolved tier to decide
/// whether any gateway call is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignedRole {
    pub discord_user_id: u64,
    pub guild_id: u64,
    pub role_id: u64,
}

impl AssignedRole {
    /// Converts an entity model to a domain model at the repository boundary.
    pub fn from_entity(entity: entity::holder_user_role::Model) -> Result<Self, AppError> {
        Ok(Self {
            discord_user_id: parse_u64_from_string(entity.discord_user_id)?,
            guild_id: parse_u64_from_string(entity.guild_id)?,
            role_id: parse_u64_from_string(entity.role_id)?,
        })
    }
}
