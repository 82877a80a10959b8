//! Error types for the ESI sync engine.
//!
//! Domain errors live in their own modules (authentication, configuration, ESI transport,
//! sync orchestration) and are aggregated into [`Error`] together with the library errors
//! the engine can encounter. [`retry`] maps every variant to a retry strategy.

pub mod auth;
pub mod config;
pub mod esi;
pub mod retry;
pub mod sync;

use thiserror::Error;

use crate::error::{auth::AuthError, config::ConfigError, esi::EsiError, sync::SyncError};

/// Main error type for the sync engine.
///
/// Uses `thiserror`'s `#[from]` attribute so that domain and library errors convert
/// automatically through the `?` operator.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Token error (missing token, failed refresh, malformed claims).
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// ESI error (non-2xx response, unexpected body shape).
    #[error(transparent)]
    EsiError(#[from] EsiError),
    /// Sync orchestration error (unknown character, unresolved path placeholder).
    #[error(transparent)]
    SyncError(#[from] SyncError),
    /// Internal error indicating a bug in the sync engine.
    #[error("Internal error in the sync engine, this indicates a bug: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// HTTP transport error (connection refused, timeout, body decoding).
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),
    /// JSON payload did not match the expected ESI response shape.
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
    /// Invalid URL in configuration.
    #[error(transparent)]
    UrlParseError(#[from] oauth2::url::ParseError),
    /// Cron scheduler error (job registration, scheduler startup).
    #[error(transparent)]
    SchedulerError(#[from] tokio_cron_scheduler::JobSchedulerError),
}
