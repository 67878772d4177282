use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HolderVerificationConfig::Table)
                    .if_not_exists()
                    .col(string(HolderVerificationConfig::GuildId).primary_key())
                    .col(string(HolderVerificationConfig::CollectionAddress))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(HolderVerificationConfig::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
pub enum HolderVerificationConfig {
    Table,
    GuildId,
    CollectionAddress,
}
