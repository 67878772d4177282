//! Discord role operations used by the verification flows.
//!
//! `GuildGateway` is the seam between role reconciliation and Discord. Grants and
//! revocations are best effort: a missing role, a missing permission or any API failure
//! is reported as `false` and logged, never raised.

use std::sync::Arc;

use async_trait::async_trait;
use serenity::all::{Cache, GuildId, Http, RoleId, UserId};

use crate::model::discord::MemberHandle;

const ROLE_AUDIT_REASON: &str = "Holder verification";

#[async_trait]
pub trait GuildGateway: Send + Sync {
    /// Looks up a member of a guild.
    ///
    /// # Returns
    /// - `Some(MemberHandle)` - The user is a member the bot can act on
    /// - `None` - The user left the guild, is unknown, or the lookup failed
    async fn resolve_member(&self, guild_id: u64, user_id: u64) -> Option<MemberHandle>;

    /// Grants a role to a member. Returns whether the grant succeeded.
    async fn add_role(&self, member: &MemberHandle, role_id: u64) -> bool;

    /// Revokes a role from a member. Returns whether the revocation succeeded.
    async fn remove_role(&self, member: &MemberHandle, role_id: u64) -> bool;
}

/// `GuildGateway` backed by the bot's Serenity HTTP client and cache.
#[derive(Clone)]
pub struct SerenityGateway {
    http: Arc<Http>,
    cache: Option<Arc<Cache>>,
}

impl SerenityGateway {
    /// Creates a gateway from the bot client's shared HTTP client and cache.
    ///
    /// # Arguments
    /// - `http` - Discord HTTP client
    /// - `cache` - Gateway cache, consulted before falling back to HTTP lookups
    pub fn new(http: Arc<Http>, cache: Option<Arc<Cache>>) -> Self {
        Self { http, cache }
    }

    fn cached_member(&self, guild_id: GuildId, user_id: UserId) -> bool {
        let Some(cache) = &self.cache else {
            return false;
        };

        cache
            .guild(guild_id)
            .is_some_and(|guild| guild.members.contains_key(&user_id))
    }
}

#[async_trait]
impl GuildGateway for SerenityGateway {
    async fn resolve_member(&self, guild_id: u64, user_id: u64) -> Option<MemberHandle> {
        let guild = GuildId::new(guild_id);
        let user = UserId::new(user_id);

        if self.cached_member(guild, user) {
            return Some(MemberHandle { guild_id, user_id });
        }

        match self.http.get_member(guild, user).await {
            Ok(_) => Some(MemberHandle { guild_id, user_id }),
            Err(e) => {
                tracing::warn!(
                    "Member {} could not be resolved in guild {}: {}",
                    user_id,
                    guild_id,
                    e
                );
                None
            }
        }
    }

    async fn add_role(&self, member: &MemberHandle, role_id: u64) -> bool {
        match self
            .http
            .add_member_role(
                GuildId::new(member.guild_id),
                UserId::new(member.user_id),
                RoleId::new(role_id),
                Some(ROLE_AUDIT_REASON),
            )
            .await
        {
            Ok(()) => {
                tracing::info!(
                    "Role {} added to user {} in guild {}",
                    role_id,
                    member.user_id,
                    member.guild_id
                );
                true
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to add role {} to user {} in guild {}: {}",
                    role_id,
                    member.user_id,
                    member.guild_id,
                    e
                );
                false
            }
        }
    }

    async fn remove_role(&self, member: &MemberHandle, role_id: u64) -> bool {
        match self
            .http
            .remove_member_role(
                GuildId::new(member.guild_id),
                UserId::new(member.user_id),
                RoleId::new(role_id),
                Some(ROLE_AUDIT_REASON),
            )
            .await
        {
            Ok(()) => {
                tracing::info!(
                    "Role {} removed from user {} in guild {}",
                    role_id,
                    member.user_id,
                    member.guild_id
                );
                true
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to remove role {} from user {} in guild {}: {}",
                    role_id,
                    member.user_id,
                    member.guild_id,
                    e
                );
                false
            }
        }
    }
}
