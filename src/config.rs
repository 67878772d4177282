use std::{str::FromStr, time::Duration};

use crate::error::{config::ConfigError, AppError};

const RESERVOIR_BASE_URL: &str = "https://api.reservoir.tools";
const DEFAULT_HOLDER_PAGE_SIZE: u64 = 500;
const DEFAULT_HOLDER_PAGE_DELAY_SECS: u64 = 5;
const DEFAULT_VERIFY_CALL_INTERVAL_MS: u64 = 250;
const DEFAULT_RECONCILE_BATCH_SIZE: usize = 100;
const DEFAULT_RECONCILE_CRON: &str = "0 */10 * * * *";

pub struct Config {
    pub database_url: String,
    pub discord_bot_token: String,

    pub reservoir_api_key: String,
    pub reservoir_base_url: String,

    /// Page size requested from the holder listing endpoint.
    pub holder_page_size: u64,
    /// Fixed pause between holder listing pages.
    pub holder_page_delay: Duration,
    /// Minimum gap between two single-wallet checks made by the queue worker.
    pub verify_call_interval: Duration,
    /// Number of per-user updates awaited together during reconciliation.
    pub reconcile_batch_size: usize,
    /// Cron expression (with seconds) for the periodic reconciliation pass.
    pub reconcile_cron: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            discord_bot_token: required("DISCORD_BOT_TOKEN")?,
            reservoir_api_key: required("RESERVOIR_API_KEY")?,
            reservoir_base_url: std::env::var("RESERVOIR_BASE_URL")
                .unwrap_or_else(|_| RESERVOIR_BASE_URL.to_string()),
            holder_page_size: parsed("HOLDER_PAGE_SIZE", DEFAULT_HOLDER_PAGE_SIZE)?,
            holder_page_delay: Duration::from_secs(parsed(
                "HOLDER_PAGE_DELAY_SECS",
                DEFAULT_HOLDER_PAGE_DELAY_SECS,
            )?),
            verify_call_interval: Duration::from_millis(parsed(
                "VERIFY_CALL_INTERVAL_MS",
                DEFAULT_VERIFY_CALL_INTERVAL_MS,
            )?),
            reconcile_batch_size: parsed("RECONCILE_BATCH_SIZE", DEFAULT_RECONCILE_BATCH_SIZE)?
                .max(1),
            reconcile_cron: std::env::var("RECONCILE_CRON")
                .unwrap_or_else(|_| DEFAULT_RECONCILE_CRON.to_string()),
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn parsed<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
        }),
        Err(_) => Ok(default),
    }
}
