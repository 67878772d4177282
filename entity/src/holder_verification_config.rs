use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "holder_verification_config")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub guild_id: String,
    pub collection_address: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::holder_role_threshold::Entity")]
    HolderRoleThreshold,
}

impl Related<super::holder_role_threshold::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HolderRoleThreshold.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
