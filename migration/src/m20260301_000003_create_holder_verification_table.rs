use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HolderVerification::Table)
                    .if_not_exists()
                    .col(string(HolderVerification::WalletAddress))
                    .col(string(HolderVerification::GuildId))
                    .col(string(HolderVerification::DiscordUserId))
                    .col(big_integer(HolderVerification::NftCount).default(0))
                    .primary_key(
                        Index::create()
                            .col(HolderVerification::WalletAddress)
                            .col(HolderVerification::GuildId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_holder_verification_user_guild")
                    .table(HolderVerification::Table)
                    .col(HolderVerification::DiscordUserId)
                    .col(HolderVerification::GuildId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HolderVerification::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum HolderVerification {
    Table,
    WalletAddress,
    GuildId,
    DiscordUserId,
    NftCount,
}
