//! Service configuration
//!
//! Read from environment variables:
//!
//! | Variable               | Default                         |
//! |------------------------|---------------------------------|
//! | `PROVENANCE_ADMIN`     | required                        |
//! | `PROVENANCE_PORT`      | `8080`                          |
//! | `PROVENANCE_NAME`      | `provenance-ledger-<uuid>`      |
//! | `PROVENANCE_LOG_LEVEL` | `info`                          |
//! | `PROVENANCE_START_HEIGHT` | `0`                          |

use std::env;

use provenance_core::{Height, Principal};
use thiserror::Error;
use tracing::Level;

pub const ADMIN_VAR: &str = "PROVENANCE_ADMIN";
pub const PORT_VAR: &str = "PROVENANCE_PORT";
pub const NAME_VAR: &str = "PROVENANCE_NAME";
pub const LOG_LEVEL_VAR: &str = "PROVENANCE_LOG_LEVEL";
pub const START_HEIGHT_VAR: &str = "PROVENANCE_START_HEIGHT";

const DEFAULT_PORT: u16 = 8080;

/// Error returned when the environment does not describe a valid service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has invalid value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Provenance service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Human-readable name of this ledger instance
    pub name: String,
    /// The ledger admin, fixed for the lifetime of the process
    pub admin: Principal,
    /// TCP port to listen on
    pub port: u16,
    /// Maximum tracing level
    pub log_level: Level,
    /// Height the logical clock starts from
    pub start_height: Height,
}

impl ServiceConfig {
    /// Configuration with defaults for everything but the admin
    pub fn new(admin: Principal) -> Self {
        Self {
            name: default_name(),
            admin,
            port: DEFAULT_PORT,
            log_level: Level::INFO,
            start_height: 0,
        }
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let admin = lookup(ADMIN_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::Missing(ADMIN_VAR))?;

        let mut config = Self::new(Principal::new(admin));

        if let Some(name) = lookup(NAME_VAR).filter(|name| !name.is_empty()) {
            config.name = name;
        }

        if let Some(port) = lookup(PORT_VAR) {
            config.port = port.parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
                key: PORT_VAR,
                value: port.clone(),
                reason: e.to_string(),
            })?;
        }

        if let Some(level) = lookup(LOG_LEVEL_VAR) {
            config.log_level = level.parse().map_err(|_| ConfigError::Invalid {
                key: LOG_LEVEL_VAR,
                value: level.clone(),
                reason: "expected one of trace, debug, info, warn, error".into(),
            })?;
        }

        if let Some(height) = lookup(START_HEIGHT_VAR) {
            config.start_height =
                height.parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
                    key: START_HEIGHT_VAR,
                    value: height.clone(),
                    reason: e.to_string(),
                })?;
        }

        Ok(config)
    }
}

fn default_name() -> String {
    format!("provenance-ledger-{}", uuid::Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_admin_is_required() {
        let result = ServiceConfig::from_lookup(lookup(&[]));
        assert_eq!(result.unwrap_err(), ConfigError::Missing(ADMIN_VAR));

        let result = ServiceConfig::from_lookup(lookup(&[(ADMIN_VAR, "  ")]));
        assert_eq!(result.unwrap_err(), ConfigError::Missing(ADMIN_VAR));
    }

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::from_lookup(lookup(&[(ADMIN_VAR, "ADMIN")])).unwrap();
        assert_eq!(config.admin, Principal::from("ADMIN"));
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.start_height, 0);
        assert!(config.name.starts_with("provenance-ledger-"));
    }

    #[test]
    fn test_overrides() {
        let config = ServiceConfig::from_lookup(lookup(&[
            (ADMIN_VAR, "ADMIN"),
            (NAME_VAR, "museum-ledger"),
            (PORT_VAR, "9090"),
            (LOG_LEVEL_VAR, "debug"),
            (START_HEIGHT_VAR, "500"),
        ]))
        .unwrap();

        assert_eq!(config.name, "museum-ledger");
        assert_eq!(config.port, 9090);
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(config.start_height, 500);
    }

    #[test]
    fn test_invalid_values() {
        let result = ServiceConfig::from_lookup(lookup(&[(ADMIN_VAR, "ADMIN"), (PORT_VAR, "http")]));
        assert!(matches!(result, Err(ConfigError::Invalid { key: PORT_VAR, .. })));

        let result =
            ServiceConfig::from_lookup(lookup(&[(ADMIN_VAR, "ADMIN"), (LOG_LEVEL_VAR, "loud")]));
        assert!(matches!(result, Err(ConfigError::Invalid { key: LOG_LEVEL_VAR, .. })));
    }
}
