use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000001_create_holder_verification_config_table::HolderVerificationConfig;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HolderRoleThreshold::Table)
                    .if_not_exists()
                    .col(pk_auto(HolderRoleThreshold::Id))
                    .col(string(HolderRoleThreshold::GuildId))
                    .col(big_integer(HolderRoleThreshold::MinNft))
                    .col(big_integer_null(HolderRoleThreshold::MaxNft))
                    .col(string(HolderRoleThreshold::RoleId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_holder_role_threshold_guild_id")
                            .from(HolderRoleThreshold::Table, HolderRoleThreshold::GuildId)
                            .to(
                                HolderVerificationConfig::Table,
                                HolderVerificationConfig::GuildId,
                            )
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .unique()
                            .name("idx_holder_role_threshold_guild_min")
                            .col(HolderRoleThreshold::GuildId)
                            .col(HolderRoleThreshold::MinNft),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HolderRoleThreshold::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum HolderRoleThreshold {
    Table,
    Id,
    GuildId,
    MinNft,
    MaxNft,
    RoleId,
}
