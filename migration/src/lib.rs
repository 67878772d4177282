pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_holder_verification_config_table;
mod m20260301_000002_create_holder_role_threshold_table;
mod m20260301_000003_create_holder_verification_table;
mod m20260301_000004_create_holder_user_role_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_holder_verification_config_table::Migration),
            Box::new(m20260301_000002_create_holder_role_threshold_table::Migration),
            Box::new(m20260301_000003_create_holder_verification_table::Migration),
            Box::new(m20260301_000004_create_holder_user_role_table::Migration),
        ]
    }
}
