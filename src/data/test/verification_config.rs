use super::*;
use crate::{
    data::verification_config::VerificationConfigRepository,
    model::verification_config::{RoleTier, SaveVerificationConfigParam},
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

/// Tests finding a configuration that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unconfigured_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_verification_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = VerificationConfigRepository::new(db);

    assert!(repo.find_by_guild_id(1000).await?.is_none());
    assert!(repo.get_collection_address(1000).await?.is_none());

    Ok(())
}

/// Tests that tiers are loaded sorted by minimum count regardless of insert order.
///
/// Expected: Ok with tiers ordered ascending by min_count
#[tokio::test]
async fn loads_config_with_sorted_tiers() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_verification_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::verification_config::VerificationConfigFactory::new(db, 1000)
        .collection_address("0xcollection")
        .tier(10, None, 222)
        .tier(1, Some(9), 111)
        .build()
        .await?;

    let repo = VerificationConfigRepository::new(db);
    let config = repo.find_by_guild_id(1000).await?.unwrap();

    assert_eq!(config.guild_id, 1000);
    assert_eq!(config.collection_address, "0xcollection");
    assert_eq!(
        config.tiers,
        vec![RoleTier::new(1, Some(9), 111), RoleTier::new(10, None, 222)]
    );

    Ok(())
}

/// Tests that saving a configuration replaces all previous tiers.
///
/// Verifies the wholesale replacement: old thresholds are deleted, the new
/// collection address is stored lower-cased and only the new tiers remain.
///
/// Expected: Ok with only the new tiers stored
#[tokio::test]
async fn save_replaces_existing_tiers() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_verification_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::verification_config::VerificationConfigFactory::new(db, 1000)
        .tier(1, Some(4), 111)
        .tier(5, Some(9), 222)
        .tier(10, None, 333)
        .build()
        .await?;

    let repo = VerificationConfigRepository::new(db);
    let saved = repo
        .save(SaveVerificationConfigParam {
            guild_id: 1000,
            collection_address: "0xNEWCollection".to_string(),
            tiers: vec![RoleTier::new(3, None, 444)],
        })
        .await?;

    assert_eq!(saved.collection_address, "0xnewcollection");

    let threshold_count = entity::prelude::HolderRoleThreshold::find()
        .filter(entity::holder_role_threshold::Column::GuildId.eq("1000"))
        .count(db)
        .await?;
    assert_eq!(threshold_count, 1);

    let stored = repo.find_by_guild_id(1000).await?.unwrap();
    assert_eq!(stored, saved);

    Ok(())
}

/// Tests that an invalid tier list is rejected without touching stored data.
///
/// Expected: Err(BadRequest) and the previous configuration intact
#[tokio::test]
async fn save_rejects_invalid_tiers() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_verification_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::verification_config::VerificationConfigFactory::new(db, 1000)
        .tier(1, None, 111)
        .build()
        .await?;

    let repo = VerificationConfigRepository::new(db);
    let result = repo
        .save(SaveVerificationConfigParam {
            guild_id: 1000,
            collection_address: "0xabc".to_string(),
            tiers: vec![RoleTier::new(5, Some(2), 222)],
        })
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let stored = repo.find_by_guild_id(1000).await?.unwrap();
    assert_eq!(stored.tiers, vec![RoleTier::new(1, None, 111)]);

    Ok(())
}

/// Tests listing all configured guilds.
///
/// Expected: Ok with one config per guild, each carrying only its own tiers
#[tokio::test]
async fn gets_all_configs() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_verification_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::verification_config::VerificationConfigFactory::new(db, 1000)
        .tier(1, None, 111)
        .build()
        .await?;
    factory::verification_config::VerificationConfigFactory::new(db, 2000)
        .tier(1, Some(2), 211)
        .tier(3, None, 222)
        .build()
        .await?;

    let repo = VerificationConfigRepository::new(db);
    let mut configs = repo.get_all().await?;
    configs.sort_by_key(|config| config.guild_id);

    assert_eq!(configs.len(), 2);
    assert_eq!(configs[0].tiers.len(), 1);
    assert_eq!(configs[1].tiers.len(), 2);

    Ok(())
}

/// Tests deleting a configuration removes its tiers too.
///
/// Expected: Ok with no config and no thresholds left for the guild
#[tokio::test]
async fn delete_removes_config_and_tiers() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_verification_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_config(db, 1000).await?;

    let repo = VerificationConfigRepository::new(db);
    repo.delete(1000).await?;

    assert!(repo.find_by_guild_id(1000).await?.is_none());
    let threshold_count = entity::prelude::HolderRoleThreshold::find()
        .count(db)
        .await?;
    assert_eq!(threshold_count, 0);

    Ok(())
}
