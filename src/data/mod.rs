//! Database repository layer for holder verification.
//!
//! This module contains repository structs that handle database operations for each
//! verification table. Repositories use SeaORM entity models internally and return domain
//! models to maintain separation between the data layer and business logic layer.
//!
//! Every repository borrows a `DatabaseConnection`; constructing one is free, so services
//! create them per operation.

pub mod assigned_role;
pub mod verification_config;
pub mod verification_record;

pub use assigned_role::AssignedRoleRepository;
pub use verification_config::VerificationConfigRepository;
pub use verification_record::VerificationRecordRepository;

#[cfg(test)]
mod test;
