use crate::{error::AppError, util::parse::parse_u64_from_string};

/// Latest known token count for one wallet in one guild.
///
/// Wallets are identified by their lower-cased address. A user may link several
/// wallets; their tier is resolved from the sum of all their records in the guild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRecord {
    /// Lower-cased wallet address.
    pub wallet_address: String,
    /// Discord guild the record belongs to.
    pub guild_id: u64,
    /// Discord user who linked the wallet.
    pub discord_user_id: u64,
    /// Tokens held in the guild's tracked collection at the last check.
    pub nft_count: u64,
}

impl VerificationRecord {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(VerificationRecord)` - Converted record
    /// - `Err(AppError::InternalErr(ParseStringId))` - A stored snowflake failed to parse
    pub fn from_entity(entity: entity::holder_verification::Model) -> Result<Self, AppError> {
        Ok(Self {
            wallet_address: entity.wallet_address,
            guild_id: parse_u64_from_string(entity.guild_id)?,
            discord_user_id: parse_u64_from_string(entity.discord_user_id)?,
            nft_count: entity.nft_count.max(0) as u64,
        })
    }
}

/// Parameters for recording the result of a wallet check.
#[derive(Debug, Clone)]
pub struct UpsertVerificationRecordParam {
    /// Wallet address in any case; normalized by the repository.
    pub wallet_address: String,
    pub guild_id: u64,
    pub discord_user_id: u64,
    pub nft_count: u64,
}
