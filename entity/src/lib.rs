//! `SeaORM` entities for the holder verification tables.

pub mod prelude;

pub mod holder_role_threshold;
pub mod holder_user_role;
pub mod holder_verification;
pub mod holder_verification_config;
