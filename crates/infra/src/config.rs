//! Process configuration read from the environment.
//!
//! | Variable              | Default        | Meaning                                   |
//! |-----------------------|----------------|-------------------------------------------|
//! | `HEARTH_BIND_ADDR`    | `0.0.0.0:8080` | HTTP listen address                       |
//! | `HEARTH_LOG_FORMAT`   | `json`         | `json` or `pretty`                        |
//! | `DATABASE_URL`        | unset          | Postgres URL; unset means in-memory store |
//! | `HEARTH_CATALOG_PATH` | unset          | JSON catalog file; unset means built-in   |

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use hearth_observability::LogFormat;

pub const BIND_ADDR_VAR: &str = "HEARTH_BIND_ADDR";
pub const LOG_FORMAT_VAR: &str = "HEARTH_LOG_FORMAT";
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
pub const CATALOG_PATH_VAR: &str = "HEARTH_CATALOG_PATH";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value}")]
    InvalidBindAddr { var: &'static str, value: String },

    #[error("{var}: {message}")]
    InvalidLogFormat { var: &'static str, message: String },

    #[error("{var} is set but empty")]
    Empty { var: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub log_format: LogFormat,
    pub database_url: Option<String>,
    pub catalog_path: Option<PathBuf>,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    /// Read configuration from an explicit set of variables.
    pub fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Result<Self, ConfigError> {
        let vars: HashMap<String, String> = vars.into_iter().collect();

        let raw_addr = vars
            .get(BIND_ADDR_VAR)
            .map(String::as_str)
            .unwrap_or(DEFAULT_BIND_ADDR);
        let bind_addr = raw_addr.parse().map_err(|_| ConfigError::InvalidBindAddr {
            var: BIND_ADDR_VAR,
            value: raw_addr.to_string(),
        })?;

        let log_format = match vars.get(LOG_FORMAT_VAR) {
            Some(raw) => raw.parse().map_err(|e: hearth_observability::UnknownLogFormat| {
                ConfigError::InvalidLogFormat {
                    var: LOG_FORMAT_VAR,
                    message: e.to_string(),
                }
            })?,
            None => LogFormat::default(),
        };

        let database_url = optional(&vars, DATABASE_URL_VAR)?;
        let catalog_path = optional(&vars, CATALOG_PATH_VAR)?.map(PathBuf::from);

        Ok(Self {
            bind_addr,
            log_format,
            database_url,
            catalog_path,
        })
    }
}

fn optional(vars: &HashMap<String, String>, var: &'static str) -> Result<Option<String>, ConfigError> {
    match vars.get(var) {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Err(ConfigError::Empty { var }),
        Some(value) => Ok(Some(value.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = AppConfig::from_vars(vars(&[])).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.database_url, None);
        assert_eq!(config.catalog_path, None);
    }

    #[test]
    fn explicit_values_are_used() {
        let config = AppConfig::from_vars(vars(&[
            (BIND_ADDR_VAR, "127.0.0.1:6155"),
            (LOG_FORMAT_VAR, "pretty"),
            (DATABASE_URL_VAR, "postgres://hearth@localhost/hearth"),
            (CATALOG_PATH_VAR, "/etc/hearth/catalog.json"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.port(), 6155);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.database_url.as_deref(), Some("postgres://hearth@localhost/hearth"));
        assert_eq!(config.catalog_path, Some(PathBuf::from("/etc/hearth/catalog.json")));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            AppConfig::from_vars(vars(&[(BIND_ADDR_VAR, "localhost")])),
            Err(ConfigError::InvalidBindAddr { .. })
        ));
        assert!(matches!(
            AppConfig::from_vars(vars(&[(LOG_FORMAT_VAR, "xml")])),
            Err(ConfigError::InvalidLogFormat { .. })
        ));
        assert_eq!(
            AppConfig::from_vars(vars(&[(DATABASE_URL_VAR, " ")])),
            Err(ConfigError::Empty { var: DATABASE_URL_VAR })
        );
    }
}
