//! Domain models and operation-specific parameter types.
//!
//! Repositories convert SeaORM entity models into these types at the data layer boundary,
//! so services never depend on the database representation (string snowflakes, signed
//! counts).

pub mod assigned_role;
pub mod discord;
pub mod holder;
pub mod reconcile;
pub mod verification_config;
pub mod verification_record;
