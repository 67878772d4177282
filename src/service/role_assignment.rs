use sea_orm::DatabaseConnection;

use crate::{
    data::assigned_role::AssignedRoleRepository,
    error::AppError,
    model::{discord::MemberHandle, reconcile::RoleChange},
    service::gateway::GuildGateway,
};

/// Moves a member from their stored tier role to a newly resolved one.
pub struct RoleAssignmentService<'a> {
    db: &'a DatabaseConnection,
    gateway: &'a dyn GuildGateway,
}

impl<'a> RoleAssignmentService<'a> {
    pub fn new(db: &'a DatabaseConnection, gateway: &'a dyn GuildGateway) -> Self {
        Self { db, gateway }
    }

    /// Applies a resolved tier role to a member.
    ///
    /// When `new_role` equals the stored assignment nothing happens. Otherwise the old
    /// role is revoked, the new one granted, and the assignment persisted.
    ///
    /// The persisted assignment follows what Discord accepted: a failed grant stores no
    /// role (or the old role if its revocation also failed) so the next pass retries.
    ///
    /// # Arguments
    /// - `member` - Resolved guild member
    /// - `new_role` - Role the member qualifies for, or `None` when they no longer do
    ///
    /// # Returns
    /// - `Ok(RoleChange::Unchanged)` - Stored role already matched; no gateway calls made
    /// - `Ok(RoleChange::Changed)` - Gateway calls were made and the assignment stored
    /// - `Err(AppError)` - Database error
    pub async fn apply(
        &self,
        member: &MemberHandle,
        new_role: Option<u64>,
    ) -> Result<RoleChange, AppError> {
        let role_repo = AssignedRoleRepository::new(self.db);

        let current_role = role_repo
            .get_current(member.user_id, member.guild_id)
            .await?
            .map(|assigned| assigned.role_id);

        if current_role == new_role {
            return Ok(RoleChange::Unchanged);
        }

        let mut held_role = current_role;

        if let Some(old_role) = current_role {
            if self.gateway.remove_role(member, old_role).await {
                held_role = None;
            }
        }

        if let Some(role) = new_role {
            if self.gateway.add_role(member, role).await {
                held_role = Some(role);
            }
        }

        role_repo
            .set_current(member.user_id, member.guild_id, held_role)
            .await?;

        tracing::info!(
            "Updated holder role for user {} in guild {}: {:?} -> {:?}",
            member.user_id,
            member.guild_id,
            current_role,
            held_role
        );

        Ok(RoleChange::Changed {
            from: current_role,
            to: held_role,
        })
    }
}
