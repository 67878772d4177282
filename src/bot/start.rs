use serenity::all::{Client, Context, EventHandler, GatewayIntents, Guild, Ready};
use serenity::async_trait;

use crate::{config::Config, error::AppError};

/// Discord bot event handler
struct Handler;

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, _ctx: Context, ready: Ready) {
        tracing::info!(
            "{} is connected to Discord in {} guilds",
            ready.user.name,
            ready.guilds.len()
        );
    }

    async fn guild_create(&self, _ctx: Context, guild: Guild, _is_new: Option<bool>) {
        tracing::debug!(
            "Guild available: {} ({}) - cached_members: {}",
            guild.name,
            guild.id,
            guild.members.len()
        );
    }
}

/// Builds the Discord client without connecting it.
///
/// The returned client's `http` and `cache` are what the role gateway uses, so they must
/// be taken before the client is moved into `start_bot`.
///
/// # Arguments
/// - `config` - Application configuration holding the bot token
///
/// # Returns
/// - `Ok(Client)` - Configured client
/// - `Err(AppError)` - Client construction failed
pub async fn init_bot(config: &Config) -> Result<Client, AppError> {
    // GUILD_MEMBERS is a privileged intent - must be enabled in Discord Developer Portal
    let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_MEMBERS;

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(Handler)
        .await?;

    Ok(client)
}

/// Connects the bot and runs it until shutdown.
///
/// Should be called from within a `tokio::spawn` task since it blocks until the bot
/// shuts down.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
