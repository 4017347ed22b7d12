//! Listener configuration.

use super::{ConfigError, parse_env};

/// Address the HTTP server binds to
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            host: parse_env("SERVER_HOST", defaults.host)?,
            port: parse_env("SERVER_PORT", defaults.port)?,
        })
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ENV_MUTEX;
    use std::env;

    #[test]
    fn test_server_defaults() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe {
            env::remove_var("SERVER_HOST");
            env::remove_var("SERVER_PORT");
        }

        let config = ServerConfig::from_env().unwrap();
        assert_eq!(config.bind_address(), ("127.0.0.1".to_string(), 5000));
    }

    #[test]
    fn test_invalid_port() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe {
            env::set_var("SERVER_PORT", "70000");
        }

        assert!(ServerConfig::from_env().is_err());

        unsafe {
            env::remove_var("SERVER_PORT");
        }
    }
}
