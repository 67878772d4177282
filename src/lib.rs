//! Discord NFT holder verification.
//!
//! Links members' wallets to an NFT collection and keeps their tier roles in sync with
//! what they hold.
//!
//! # Architecture
//!
//! - **Service Layer** (`service/`) - Ownership lookups, the verification queue, tier
//!   resolution, role assignment, reconciliation and on-demand verification
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based configuration
//! - **State** (`state`) - Shared components (DB, queue, gateway, ownership client)
//! - **Startup** (`startup`) - Logging, database and HTTP client initialization
//! - **Scheduler** (`scheduler/`) - Cron job for periodic reconciliation
//! - **Bot** (`bot/`) - Discord client whose HTTP client and cache back the gateway
//!
//! # Verification Flow
//!
//! 1. A user submits a wallet; `HolderVerificationService::verify` queues the check
//! 2. The queue worker asks the ownership API, one wallet at a time
//! 3. The record is stored and the user's total resolved to a tier
//! 4. The old tier role is revoked and the new one granted through `GuildGateway`
//!
//! Every `RECONCILE_CRON` tick the scheduler lists all holders of each configured
//! collection and repeats steps 3 and 4 for every known holder.

pub mod bot;
pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
