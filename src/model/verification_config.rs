//! Holder verification configuration models.
//!
//! A guild tracks one NFT collection and maps ranges of held tokens to Discord roles.
//! Configurations are replaced wholesale on every save; tiers are never edited in place.

use std::collections::HashSet;

use crate::{error::AppError, util::parse::parse_u64_from_string};

/// A token-count range mapped to a Discord role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleTier {
    /// Smallest total token count that qualifies for this tier.
    pub min_count: u64,
    /// Largest total token count that qualifies, or `None` when unbounded.
    pub max_count: Option<u64>,
    /// Discord role granted to members of this tier.
    pub role_id: u64,
}

impl RoleTier {
    pub fn new(min_count: u64, max_count: Option<u64>, role_id: u64) -> Self {
        Self {
            min_count,
            max_count,
            role_id,
        }
    }

    /// Converts a threshold entity at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(RoleTier)` - Converted tier
    /// - `Err(AppError::InternalErr(ParseStringId))` - Stored role id is not a valid u64
    pub fn from_entity(entity: entity::holder_role_threshold::Model) -> Result<Self, AppError> {
        Ok(Self {
            min_count: entity.min_nft.max(0) as u64,
            max_count: entity.max_nft.map(|max| max.max(0) as u64),
            role_id: parse_u64_from_string(entity.role_id)?,
        })
    }
}

/// Per-guild holder verification configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationConfig {
    /// Discord guild the configuration belongs to.
    pub guild_id: u64,
    /// Lower-cased contract address of the tracked collection.
    pub collection_address: String,
    /// Role tiers ordered by ascending `min_count`.
    pub tiers: Vec<RoleTier>,
}

impl VerificationConfig {
    /// Converts the config row and its thresholds into a domain model.
    ///
    /// Tiers are sorted by `min_count` so callers can rely on ascending order.
    ///
    /// # Arguments
    /// - `entity` - The config row
    /// - `thresholds` - All threshold rows belonging to the config
    ///
    /// # Returns
    /// - `Ok(VerificationConfig)` - Converted configuration
    /// - `Err(AppError::InternalErr(ParseStringId))` - A stored id failed to parse
    pub fn from_entity(
        entity: entity::holder_verification_config::Model,
        thresholds: Vec<entity::holder_role_threshold::Model>,
    ) -> Result<Self, AppError> {
        let mut tiers = thresholds
            .into_iter()
            .map(RoleTier::from_entity)
            .collect::<Result<Vec<_>, _>>()?;
        tiers.sort_by_key(|tier| tier.min_count);

        Ok(Self {
            guild_id: parse_u64_from_string(entity.guild_id)?,
            collection_address: entity.collection_address,
            tiers,
        })
    }
}

/// Parameters for creating or replacing a guild's verification configuration.
#[derive(Debug, Clone)]
pub struct SaveVerificationConfigParam {
    /// Discord guild being configured.
    pub guild_id: u64,
    /// Contract address of the collection to track. Lower-cased on save.
    pub collection_address: String,
    /// Complete replacement tier list.
    pub tiers: Vec<RoleTier>,
}

impl SaveVerificationConfigParam {
    /// Checks the tier list before it replaces the stored configuration.
    ///
    /// # Returns
    /// - `Ok(())` - Tiers are usable by the resolver
    /// - `Err(AppError::BadRequest)` - Empty collection address, no tiers, a tier whose
    ///   `max_count` is below its `min_count`, or two tiers sharing a `min_count`
    pub fn validate(&self) -> Result<(), AppError> {
        if self.collection_address.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Collection address must not be empty".to_string(),
            ));
        }

        if self.tiers.is_empty() {
            return Err(AppError::BadRequest(
                "At least one role tier is required".to_string(),
            ));
        }

        let mut seen_mins = HashSet::new();
        for tier in &self.tiers {
            if let Some(max) = tier.max_count {
                if max < tier.min_count {
                    return Err(AppError::BadRequest(format!(
                        "Tier for role {} has max {} below min {}",
                        tier.role_id, max, tier.min_count
                    )));
                }
            }

            if !seen_mins.insert(tier.min_count) {
                return Err(AppError::BadRequest(format!(
                    "More than one tier starts at {} tokens",
                    tier.min_count
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(tiers: Vec<RoleTier>) -> SaveVerificationConfigParam {
        SaveVerificationConfigParam {
            guild_id: 1,
            collection_address: "0xabc".to_string(),
            tiers,
        }
    }

    #[test]
    fn accepts_ordered_tiers() {
        let result = param(vec![
            RoleTier::new(1, Some(4), 10),
            RoleTier::new(5, None, 20),
        ])
        .validate();

        assert!(result.is_ok());
    }

    #[test]
    fn rejects_max_below_min() {
        let result = param(vec![RoleTier::new(5, Some(4), 10)]).validate();

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn rejects_duplicate_min() {
        let result = param(vec![
            RoleTier::new(1, Some(4), 10),
            RoleTier::new(1, None, 20),
        ])
        .validate();

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn rejects_empty_tiers() {
        assert!(matches!(
            param(Vec::new()).validate(),
            Err(AppError::BadRequest(_))
        ));
    }
}
