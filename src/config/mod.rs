//! Configuration structures and loading utilities.
//!
//! Everything is read once at startup into an [`AppConfig`] and handed to the
//! app factory. Optional variables fall back to defaults; a variable that is set
//! but cannot be parsed is reported as a [`ConfigError`].

pub mod conversation;
pub mod server;
pub mod telemetry;
pub mod upstream;
pub mod weather;

pub use conversation::*;
pub use server::*;
pub use telemetry::*;
pub use upstream::*;
pub use weather::*;

use std::{env, fmt::Display, str::FromStr};

/// Errors raised while loading configuration from the environment
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Complete runtime configuration for the service
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub weather: WeatherApiConfig,
    pub upstream: UpstreamClientConfig,
    pub conversation: ConversationConfig,
    pub metrics: MetricsConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load every section from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            server: ServerConfig::from_env()?,
            weather: WeatherApiConfig::from_env()?,
            upstream: UpstreamClientConfig::from_env()?,
            conversation: ConversationConfig::from_env()?,
            metrics: MetricsConfig::from_env(),
            logging: LoggingConfig::from_env(),
        })
    }

    /// Defaults for every section except the provider credentials
    pub fn new(weather: WeatherApiConfig) -> Self {
        Self {
            server: ServerConfig::default(),
            weather,
            upstream: UpstreamClientConfig::default(),
            conversation: ConversationConfig::default(),
            metrics: MetricsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Read `key` and parse it, returning `default` when the variable is unset or empty
pub(crate) fn parse_env<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => {
            value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
                key,
                value,
                reason: e.to_string(),
            })
        }
        _ => Ok(default),
    }
}

/// Read a boolean flag; anything other than "true" (case-insensitive) is false
pub(crate) fn flag_env(key: &str, default: bool) -> bool {
    env::var(key)
        .map(|v| v.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(default)
}

// Tests in different modules mutate the same process environment.
#[cfg(test)]
pub(crate) static ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
