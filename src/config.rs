use std::env;
use std::str::FromStr;

use crate::services::readings::ActuatorTarget;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deployment {
    Local,
    Dev,
    Stage,
    Prod,
}

impl Deployment {
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Self::Dev,
            "stage" | "staging" => Self::Stage,
            "prod" | "production" => Self::Prod,
            _ => Self::Local,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        if s.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Text
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Database
    pub database_url: String,

    // API settings
    pub api_host: String,
    pub api_port: u16,

    // Actuator
    pub actuator_target: ActuatorTarget,

    // Dashboard
    pub dashboard_poll_interval_ms: u64,

    // Rate limiting (write routes only)
    pub disable_rate_limiting: bool,
    pub rate_limit_write_replenish_ms: u64,
    pub rate_limit_write_burst: u32,

    // Logging
    pub log_format: LogFormat,

    // Application metadata
    pub deployment: Deployment,
}

/// Parse an optional variable, falling back to `default` when unset or malformed.
fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

impl Config {
    /// Load configuration from `.env` and the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if `DATABASE_URL` is not set, or
    /// `ConfigError::Invalid` if `ACTUATOR_TARGET` cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let actuator_target = match lookup("ACTUATOR_TARGET") {
            Some(raw) => raw
                .parse()
                .map_err(|reason| ConfigError::Invalid("ACTUATOR_TARGET", reason))?,
            None => ActuatorTarget::default(),
        };

        Ok(Self {
            // Database
            database_url: lookup("DATABASE_URL")
                .filter(|url| !url.trim().is_empty())
                .ok_or(ConfigError::Missing("DATABASE_URL"))?,

            // API settings
            api_host: lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            api_port: parse_or(&lookup, "API_PORT", 3000),

            actuator_target,

            dashboard_poll_interval_ms: parse_or(&lookup, "DASHBOARD_POLL_INTERVAL_MS", 2000),

            // Rate limiting
            disable_rate_limiting: parse_or(&lookup, "DISABLE_RATE_LIMITING", false),
            rate_limit_write_replenish_ms: parse_or(&lookup, "RATE_LIMIT_WRITE_REPLENISH_MS", 100),
            rate_limit_write_burst: parse_or(&lookup, "RATE_LIMIT_WRITE_BURST", 30),

            log_format: LogFormat::from_str(
                &lookup("LOG_FORMAT").unwrap_or_else(|| "text".to_string()),
            ),

            // Application metadata
            deployment: Deployment::from_str(
                &lookup("DEPLOYMENT").unwrap_or_else(|| "local".to_string()),
            ),
        })
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
