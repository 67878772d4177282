//! Business logic for holder verification.
//!
//! Services orchestrate the data layer, the NFT ownership API and the Discord gateway:
//!
//! - **Ownership** (`ownership/`) - Raw API access plus the degrade-to-empty client policy
//! - **Verification queue** (`verification_queue`) - Single worker serializing wallet checks
//! - **Tier** (`tier`) - Maps a total token count to a configured role
//! - **Role assignment** (`role_assignment`) - Revoke/grant/persist for one user
//! - **Reconcile** (`reconcile`) - Full-collection pass with bounded fan-out
//! - **Verification** (`verification`) - On-demand check for a single wallet
//! - **Gateway** (`gateway`) - Discord role operations behind a trait
//! - **User locks** (`user_lock`) - Serializes role updates for one member

pub mod gateway;
pub mod ownership;
pub mod reconcile;
pub mod role_assignment;
pub mod tier;
pub mod user_lock;
pub mod verification;
pub mod verification_queue;

#[cfg(test)]
mod test;
