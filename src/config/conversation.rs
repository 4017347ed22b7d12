//! Conversation behaviour settings: forecast horizon and context lifespan.

use super::{ConfigError, parse_env};

/// Tunables for how the webhook answers
#[derive(Debug, Clone)]
pub struct ConversationConfig {
    /// How many days past today the provider can forecast
    pub forecast_horizon_days: i64,
    /// Turns the `user-city` context survives on the platform side
    pub user_city_context_lifespan: u32,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            forecast_horizon_days: 5,
            user_city_context_lifespan: 5,
        }
    }
}

impl ConversationConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let forecast_horizon_days =
            parse_env("FORECAST_HORIZON_DAYS", defaults.forecast_horizon_days)?;
        if forecast_horizon_days < 0 {
            return Err(ConfigError::Invalid {
                key: "FORECAST_HORIZON_DAYS",
                value: forecast_horizon_days.to_string(),
                reason: "horizon cannot be negative".to_string(),
            });
        }

        let user_city_context_lifespan = parse_env(
            "USER_CITY_CONTEXT_LIFESPAN",
            defaults.user_city_context_lifespan,
        )?;

        Ok(Self {
            forecast_horizon_days,
            user_city_context_lifespan,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ENV_MUTEX;
    use std::env;

    #[test]
    fn test_conversation_defaults() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe {
            env::remove_var("FORECAST_HORIZON_DAYS");
            env::remove_var("USER_CITY_CONTEXT_LIFESPAN");
        }

        let config = ConversationConfig::from_env().unwrap();
        assert_eq!(config.forecast_horizon_days, 5);
        assert_eq!(config.user_city_context_lifespan, 5);
    }

    #[test]
    fn test_negative_horizon_rejected() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe {
            env::set_var("FORECAST_HORIZON_DAYS", "-1");
        }

        assert!(ConversationConfig::from_env().is_err());

        unsafe {
            env::remove_var("FORECAST_HORIZON_DAYS");
        }
    }
}
