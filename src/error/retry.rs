use reqwest::StatusCode;
use sea_orm::DbErr;

use super::{esi::EsiError, Error};

/// ESI's error-limit status, sent once too many errors were produced in the current window.
const ERROR_LIMITED: u16 = 420;

/// Strategy for handling errors in a retry context
#[derive(Debug, PartialEq, Eq)]
pub enum ErrorRetryStrategy {
    /// Retry with exponential backoff (server errors, throttling, transport failures)
    Retry,
    /// Failed permanently (bad request, missing data, bugs)
    Fail,
}

impl Error {
    /// Determine error retry strategy based upon application Error type
    pub fn to_retry_strategy(&self) -> ErrorRetryStrategy {
        match self {
            Self::EsiError(EsiError::Http { status, .. }) => status_retry_strategy(*status),
            // A page that is not an array will not become one on retry
            Self::EsiError(EsiError::UnexpectedBody { .. }) => ErrorRetryStrategy::Fail,

            Self::ReqwestError(reqwest_error) => {
                if reqwest_error.is_decode() || reqwest_error.is_builder() {
                    ErrorRetryStrategy::Fail
                } else if let Some(status) = reqwest_error.status() {
                    status_retry_strategy(status)
                } else {
                    // Network error, timeout or connection issue
                    ErrorRetryStrategy::Retry
                }
            }

            Self::DbErr(db_err) => match db_err {
                // Connection acquisition and connection errors are transient
                DbErr::ConnectionAcquire(_) => ErrorRetryStrategy::Retry,
                DbErr::Conn(_) => ErrorRetryStrategy::Retry,
                // Constraint violations, type conversion, missing records
                _ => ErrorRetryStrategy::Fail,
            },

            // Refresh failures are retried on the next pass, not within this one
            Self::AuthError(_) => ErrorRetryStrategy::Fail,
            Self::ConfigError(_) => ErrorRetryStrategy::Fail,
            Self::SyncError(_) => ErrorRetryStrategy::Fail,
            Self::InternalError(_) => ErrorRetryStrategy::Fail,
            Self::JsonError(_) => ErrorRetryStrategy::Fail,
            Self::UrlParseError(_) => ErrorRetryStrategy::Fail,
            Self::SchedulerError(_) => ErrorRetryStrategy::Fail,
        }
    }
}

fn status_retry_strategy(status: StatusCode) -> ErrorRetryStrategy {
    match status {
        // ESI is temporarily unavailable
        s if s.is_server_error() => ErrorRetryStrategy::Retry,
        // Throttled, back off and try again
        StatusCode::TOO_MANY_REQUESTS => ErrorRetryStrategy::Retry,
        s if s.as_u16() == ERROR_LIMITED => ErrorRetryStrategy::Retry,
        // Invalid request or missing grant, retrying changes nothing
        _ => ErrorRetryStrategy::Fail,
    }
}
