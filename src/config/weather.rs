//! Weather provider configuration.

use super::{ConfigError, parse_env};
use std::env;

pub const DEFAULT_OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Credentials and endpoint settings for the OpenWeatherMap API
#[derive(Clone)]
pub struct WeatherApiConfig {
    pub api_key: String,
    pub base_url: String,
    pub units: String,
}

impl WeatherApiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_OPENWEATHER_BASE_URL.to_string(),
            units: "metric".to_string(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// `OPENWEATHER_API_KEY` is preferred; the shorter `API_KEY` is accepted
    /// for existing deployments.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = ["OPENWEATHER_API_KEY", "API_KEY"]
            .iter()
            .filter_map(|key| env::var(key).ok())
            .map(|v| v.trim().to_string())
            .find(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("OPENWEATHER_API_KEY"))?;

        let base_url: String =
            parse_env("OPENWEATHER_BASE_URL", DEFAULT_OPENWEATHER_BASE_URL.to_string())?;
        url::Url::parse(&base_url).map_err(|e| ConfigError::Invalid {
            key: "OPENWEATHER_BASE_URL",
            value: base_url.clone(),
            reason: e.to_string(),
        })?;

        let units = parse_env("OPENWEATHER_UNITS", "metric".to_string())?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            units,
        })
    }
}

// Keeps the key out of `{:?}` output in logs and panics.
impl std::fmt::Debug for WeatherApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherApiConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("units", &self.units)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ENV_MUTEX;

    fn clear() {
        unsafe {
            env::remove_var("OPENWEATHER_API_KEY");
            env::remove_var("API_KEY");
            env::remove_var("OPENWEATHER_BASE_URL");
            env::remove_var("OPENWEATHER_UNITS");
        }
    }

    #[test]
    fn test_missing_api_key_is_an_error() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear();

        let err = WeatherApiConfig::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::Missing("OPENWEATHER_API_KEY")));
    }

    #[test]
    fn test_legacy_api_key_variable() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear();
        unsafe {
            env::set_var("API_KEY", "legacy-key");
        }

        let config = WeatherApiConfig::from_env().unwrap();
        assert_eq!(config.api_key, "legacy-key");
        assert_eq!(config.base_url, DEFAULT_OPENWEATHER_BASE_URL);
        assert_eq!(config.units, "metric");

        clear();
    }

    #[test]
    fn test_base_url_override_and_trailing_slash() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear();
        unsafe {
            env::set_var("OPENWEATHER_API_KEY", "primary");
            env::set_var("API_KEY", "legacy");
            env::set_var("OPENWEATHER_BASE_URL", "http://localhost:9999/data/2.5/");
        }

        let config = WeatherApiConfig::from_env().unwrap();
        assert_eq!(config.api_key, "primary");
        assert_eq!(config.base_url, "http://localhost:9999/data/2.5");

        clear();
    }

    #[test]
    fn test_invalid_base_url() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear();
        unsafe {
            env::set_var("OPENWEATHER_API_KEY", "primary");
            env::set_var("OPENWEATHER_BASE_URL", "not a url");
        }

        let err = WeatherApiConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("OPENWEATHER_BASE_URL"));

        clear();
    }

    #[test]
    fn test_debug_hides_api_key() {
        let config = WeatherApiConfig::new("super-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
