use crate::{
    config::Config,
    error::AppError,
    service::ownership::{OwnershipClient, ReservoirApi},
};

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` overrides the default filter, which logs `info` and above while keeping
/// `sqlx` and `serenity` at `warn`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info,sqlx=warn,serenity=warn")
            }),
        )
        .init();
}

/// Connects to the database and runs pending migrations.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the HTTP client used for ownership API requests.
///
/// Redirects are disabled so the bearer token is never forwarded to another host.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    Ok(client)
}

/// Builds the ownership client over the Reservoir API.
pub fn setup_ownership_client(config: &Config, http_client: reqwest::Client) -> OwnershipClient {
    let api = ReservoirApi::new(
        http_client,
        config.reservoir_api_key.clone(),
        config.reservoir_base_url.clone(),
    );

    OwnershipClient::new(
        std::sync::Arc::new(api),
        config.holder_page_size,
        config.holder_page_delay,
    )
}
