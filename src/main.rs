use std::sync::Arc;

use holderbot::{
    bot,
    config::Config,
    error::AppError,
    scheduler::holder_reconcile,
    service::{gateway::SerenityGateway, verification_queue::VerificationQueue},
    startup,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let http_client = startup::setup_reqwest_client()?;
    let ownership = Arc::new(startup::setup_ownership_client(&config, http_client));

    let queue = Arc::new(VerificationQueue::new(
        ownership.clone(),
        config.verify_call_interval,
    ));
    queue.start().await;

    // Initialize Discord bot and share its HTTP client and cache with the gateway
    let bot_client = bot::start::init_bot(&config).await?;
    let gateway = Arc::new(SerenityGateway::new(
        bot_client.http.clone(),
        Some(bot_client.cache.clone()),
    ));
    let shard_manager = bot_client.shard_manager.clone();

    tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(bot_client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    let state = AppState::new(
        db,
        gateway,
        ownership,
        queue.clone(),
        config.reconcile_batch_size,
    );

    let mut scheduler = holder_reconcile::start_scheduler(state, &config.reconcile_cron).await?;

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }

    tracing::info!("Shutting down");

    scheduler.shutdown().await?;
    shard_manager.shutdown_all().await;
    queue.shutdown().await;

    Ok(())
}
