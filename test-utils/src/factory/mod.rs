//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating verification entities with sensible
//! defaults, reducing boilerplate in tests.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     let config = factory::create_config(&db, 1000).await?;
//!     let record = factory::create_verification(&db, 1000, 42, 3).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let config = factory::verification_config::VerificationConfigFactory::new(&db, 1000)
//!     .collection_address("0xabc")
//!     .tier(1, Some(9), 111)
//!     .tier(10, None, 222)
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `verification_config` - Create a guild config together with its role thresholds
//! - `holder_verification` - Create wallet verification records
//! - `holder_user_role` - Create assigned holder roles
//! - `helpers` - Unique id and wallet generation

pub mod helpers;
pub mod holder_user_role;
pub mod holder_verification;
pub mod verification_config;

pub use holder_user_role::create_user_role;
pub use holder_verification::create_verification;
pub use verification_config::create_config;
