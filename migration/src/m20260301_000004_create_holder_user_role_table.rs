use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HolderUserRole::Table)
                    .if_not_exists()
                    .col(string(HolderUserRole::DiscordUserId))
                    .col(string(HolderUserRole::GuildId))
                    .col(string(HolderUserRole::RoleId))
                    .primary_key(
                        Index::create()
                            .col(HolderUserRole::DiscordUserId)
                            .col(HolderUserRole::GuildId),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HolderUserRole::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum HolderUserRole {
    Table,
    DiscordUserId,
    GuildId,
    RoleId,
}
