use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "holder_role_threshold")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub guild_id: String,
    pub min_nft: i64,
    pub max_nft: Option<i64>,
    pub role_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::holder_verification_config::Entity",
        from = "Column::GuildId",
        to = "super::holder_verification_config::Column::GuildId",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    HolderVerificationConfig,
}

impl Related<super::holder_verification_config::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HolderVerificationConfig.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
