//! Discord bot client.
//!
//! The bot runs in its own tokio task for the lifetime of the process. Its HTTP client
//! and cache are shared with `SerenityGateway`, which performs all holder role changes.
//!
//! # Gateway Intents
//!
//! - `GUILDS` - Guild availability, needed for the guild cache
//! - `GUILD_MEMBERS` - Member lists, used to resolve members from the cache
//!
//! Note: `GUILD_MEMBERS` is a privileged intent and must be explicitly enabled
//! in the Discord Developer Portal for the bot application.

pub mod start;
