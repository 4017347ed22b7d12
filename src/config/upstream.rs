//! Configuration for the outbound HTTP client used to reach the weather provider.

use super::{ConfigError, flag_env, parse_env};
use serde::{Deserialize, Serialize};

/// Timeouts and logging switches for upstream calls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamClientConfig {
    /// Overall request timeout (in seconds)
    pub timeout_seconds: u64,

    /// Connection timeout (in seconds)
    pub connect_timeout_seconds: u64,

    /// Log every upstream call, not only failures
    pub enable_detailed_logging: bool,
}

impl Default for UpstreamClientConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 5,
            connect_timeout_seconds: 3,
            enable_detailed_logging: true,
        }
    }
}

impl UpstreamClientConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let timeout_seconds = parse_env("UPSTREAM_TIMEOUT_SECONDS", defaults.timeout_seconds)?;
        let connect_timeout_seconds = parse_env(
            "UPSTREAM_CONNECT_TIMEOUT_SECONDS",
            defaults.connect_timeout_seconds,
        )?;
        let enable_detailed_logging =
            flag_env("UPSTREAM_DETAILED_LOGGING", defaults.enable_detailed_logging);

        if timeout_seconds == 0 {
            return Err(ConfigError::Invalid {
                key: "UPSTREAM_TIMEOUT_SECONDS",
                value: "0".to_string(),
                reason: "timeout must be at least one second".to_string(),
            });
        }

        Ok(Self {
            timeout_seconds,
            connect_timeout_seconds,
            enable_detailed_logging,
        })
    }
}
