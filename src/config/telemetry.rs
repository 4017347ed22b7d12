//! Logging and metrics settings.

use super::flag_env;
use std::env;

/// Output format for the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Filter used when `RUST_LOG` is not set
    pub default_filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            default_filter: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        let format = match env::var("LOG_FORMAT") {
            Ok(v) if v.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Self {
            format,
            ..Self::default()
        }
    }
}

/// Whether `/api/metrics` serves the registry
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl MetricsConfig {
    pub fn from_env() -> Self {
        Self {
            enabled: flag_env("METRICS_ENABLED", true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ENV_MUTEX;

    #[test]
    fn test_log_format_json() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe {
            env::set_var("LOG_FORMAT", "JSON");
        }
        assert_eq!(LoggingConfig::from_env().format, LogFormat::Json);

        unsafe {
            env::remove_var("LOG_FORMAT");
        }
        assert_eq!(LoggingConfig::from_env().format, LogFormat::Pretty);
    }

    #[test]
    fn test_metrics_can_be_disabled() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe {
            env::set_var("METRICS_ENABLED", "false");
        }
        assert!(!MetricsConfig::from_env().enabled);

        unsafe {
            env::remove_var("METRICS_ENABLED");
        }
        assert!(MetricsConfig::from_env().enabled);
    }
}
