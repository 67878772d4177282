/// A guild member that the gateway confirmed it can act on.
///
/// Only produced by `GuildGateway::resolve_member`; holding one means role grants and
/// revocations can be attempted for this user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemberHandle {
    pub guild_id: u64,
    pub user_id: u64,
}
