//! Error types for the holder verification core.
//!
//! This module provides the application's error hierarchy. The `AppError` enum serves
//! as the top-level error type that wraps domain-specific errors so that every layer can
//! propagate failures with `?`. The verification paths decide per unit of work whether a
//! failure is logged and swallowed or surfaced to the caller.

pub mod config;
pub mod internal;
pub mod ownership;
pub mod queue;

use thiserror::Error;

use crate::error::{
    config::ConfigError, internal::InternalError, ownership::OwnershipError, queue::QueueError,
};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application. Most variants
/// use `#[from]` for automatic error conversion.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Internal inconsistency such as an unparsable stored snowflake.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Raw ownership API failure.
    ///
    /// Only surfaces from `OwnershipApi` implementations; the ownership client
    /// degrades it to an empty result before it reaches verification flows.
    #[error(transparent)]
    OwnershipErr(#[from] OwnershipError),

    /// Verification queue could not complete a task.
    #[error(transparent)]
    QueueErr(#[from] QueueError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// HTTP client error from reqwest.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Resource not found error.
    ///
    /// # Fields
    /// - Message describing what resource was not found
    #[error("{0}")]
    NotFound(String),

    /// Invalid input, such as an inconsistent tier configuration.
    ///
    /// # Fields
    /// - Message describing what was invalid
    #[error("{0}")]
    BadRequest(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
