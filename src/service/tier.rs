use crate::model::verification_config::VerificationConfig;

/// Maps a user's total token count to a role.
///
/// Picks the tier with the largest `min_count` not above `total_count`. If that tier is
/// bounded and `total_count` exceeds its `max_count`, the count sits in a gap between
/// tiers and no role is returned.
pub fn resolve_tier(config: &VerificationConfig, total_count: u64) -> Option<u64> {
    let tier = config
        .tiers
        .iter()
        .filter(|tier| tier.min_count <= total_count)
        .max_by_key(|tier| tier.min_count)?;

    match tier.max_count {
        Some(max_count) if total_count > max_count => None,
        _ => Some(tier.role_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::verification_config::RoleTier;

    fn config(tiers: Vec<RoleTier>) -> VerificationConfig {
        VerificationConfig {
            guild_id: 1,
            collection_address: "0xcollection".to_string(),
            tiers,
        }
    }

    #[test]
    fn picks_highest_reached_tier() {
        let config = config(vec![
            RoleTier::new(1, Some(4), 100),
            RoleTier::new(5, None, 200),
        ]);

        assert_eq!(resolve_tier(&config, 0), None);
        assert_eq!(resolve_tier(&config, 1), Some(100));
        assert_eq!(resolve_tier(&config, 3), Some(100));
        assert_eq!(resolve_tier(&config, 5), Some(200));
        assert_eq!(resolve_tier(&config, 10), Some(200));
    }

    #[test]
    fn count_in_gap_gets_no_role() {
        let config = config(vec![
            RoleTier::new(1, Some(2), 100),
            RoleTier::new(10, None, 200),
        ]);

        assert_eq!(resolve_tier(&config, 2), Some(100));
        assert_eq!(resolve_tier(&config, 5), None);
        assert_eq!(resolve_tier(&config, 10), Some(200));
    }

    #[test]
    fn tier_order_does_not_matter() {
        let config = config(vec![
            RoleTier::new(10, None, 300),
            RoleTier::new(1, Some(4), 100),
            RoleTier::new(5, Some(9), 200),
        ]);

        assert_eq!(resolve_tier(&config, 7), Some(200));
        assert_eq!(resolve_tier(&config, 12), Some(300));
    }

    #[test]
    fn empty_config_resolves_nothing() {
        assert_eq!(resolve_tier(&config(Vec::new()), 50), None);
    }
}
