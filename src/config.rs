use std::{str::FromStr, time::Duration};

use crate::error::config::ConfigError;

pub const DEFAULT_ESI_BASE_URL: &str = "https://esi.evetech.net/latest";
pub const DEFAULT_ESI_LOGIN_URL: &str = "https://login.eveonline.com";
pub const DEFAULT_SYNC_CRON: &str = "0 */5 * * * *";

const DEFAULT_SYNC_WORKERS: usize = 4;
const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 8;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PASS_TIMEOUT_SECS: u64 = 300;

/// Runtime configuration read from the process environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub esi_client_id: String,
    pub esi_client_secret: String,
    pub contact_email: String,
    pub user_agent: String,
    pub esi_base_url: String,
    pub esi_login_url: String,
    pub sync_workers: usize,
    pub esi_max_concurrent_requests: usize,
    pub esi_request_timeout: Duration,
    pub sync_pass_timeout: Duration,
    pub sync_cron: String,
}

impl Config {
    /// Reads configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` beforehand to load a `.env` file.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and optional ones parsable
    /// - `Err(ConfigError::MissingEnvVar)` - A required variable is unset
    /// - `Err(ConfigError::InvalidEnvValue)` - A numeric variable could not be parsed or is zero
    pub fn from_env() -> Result<Self, ConfigError> {
        let contact_email = required("CONTACT_EMAIL")?;
        let user_agent = format!(
            "{}/{} ({})",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            contact_email
        );

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            esi_client_id: required("ESI_CLIENT_ID")?,
            esi_client_secret: required("ESI_CLIENT_SECRET")?,
            contact_email,
            user_agent,
            esi_base_url: optional("ESI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_ESI_BASE_URL.to_string()),
            esi_login_url: optional("ESI_LOGIN_URL")
                .unwrap_or_else(|| DEFAULT_ESI_LOGIN_URL.to_string()),
            sync_workers: positive("SYNC_WORKERS", DEFAULT_SYNC_WORKERS)?,
            esi_max_concurrent_requests: positive(
                "ESI_MAX_CONCURRENT_REQUESTS",
                DEFAULT_MAX_CONCURRENT_REQUESTS,
            )?,
            esi_request_timeout: Duration::from_secs(positive(
                "ESI_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?),
            sync_pass_timeout: Duration::from_secs(positive(
                "SYNC_PASS_TIMEOUT_SECS",
                DEFAULT_PASS_TIMEOUT_SECS,
            )?),
            sync_cron: optional("SYNC_CRON").unwrap_or_else(|| DEFAULT_SYNC_CRON.to_string()),
        })
    }
}

fn required(var: &str) -> Result<String, ConfigError> {
    optional(var).ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
}

/// Unset and empty variables are treated the same.
fn optional(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|value| !value.trim().is_empty())
}

fn positive<T>(var: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + PartialOrd + Default,
    T::Err: std::fmt::Display,
{
    let Some(raw) = optional(var) else {
        return Ok(default);
    };

    let value = raw
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: e.to_string(),
        })?;

    if value <= T::default() {
        return Err(ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment variables are process-wide, so each test uses its own names.

    #[test]
    fn positive_uses_default_when_unset() {
        let value = positive::<usize>("ESI_SYNC_TEST_UNSET_WORKERS", 4).unwrap();
        assert_eq!(value, 4);
    }

    #[test]
    fn positive_rejects_garbage_and_zero() {
        std::env::set_var("ESI_SYNC_TEST_GARBAGE_WORKERS", "many");
        let result = positive::<usize>("ESI_SYNC_TEST_GARBAGE_WORKERS", 4);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnvValue { ref var, .. }) if var == "ESI_SYNC_TEST_GARBAGE_WORKERS"
        ));

        std::env::set_var("ESI_SYNC_TEST_ZERO_WORKERS", "0");
        let result = positive::<usize>("ESI_SYNC_TEST_ZERO_WORKERS", 4);
        assert!(matches!(result, Err(ConfigError::InvalidEnvValue { .. })));
    }

    #[test]
    fn required_reports_missing_variable() {
        let result = required("ESI_SYNC_TEST_MISSING_VALUE");
        assert!(matches!(
            result,
            Err(ConfigError::MissingEnvVar(ref var)) if var == "ESI_SYNC_TEST_MISSING_VALUE"
        ));
    }
}
