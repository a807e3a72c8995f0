//! Server configuration loaded from environment variables.
//!
//! Variables are prefixed with `TASKTRACK_`, apart from the conventional
//! `DATABASE_URL`. Parsing is driven by a lookup function so callers can
//! supply values without touching the process environment.

use std::net::SocketAddr;
use thiserror::Error;

/// Connection string for the relational store.
pub const DATABASE_URL_KEY: &str = "DATABASE_URL";
/// Socket address the HTTP server binds.
pub const BIND_ADDR_KEY: &str = "TASKTRACK_BIND_ADDR";
/// Maximum number of pooled database connections.
pub const POOL_MAX_SIZE_KEY: &str = "TASKTRACK_POOL_MAX_SIZE";
/// Log filter used when `RUST_LOG` is unset.
pub const LOG_FILTER_KEY: &str = "TASKTRACK_LOG";

/// Default bind address.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
/// Default connection pool size.
pub const DEFAULT_POOL_MAX_SIZE: u32 = 10;
/// Default log filter.
pub const DEFAULT_LOG_FILTER: &str = "tasktrack=info,tower_http=info";

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required variable is absent or blank.
    #[error("missing required configuration variable {0}")]
    Missing(&'static str),

    /// A variable holds a value that cannot be used.
    #[error("invalid value '{value}' for {key}")]
    Invalid {
        /// Variable name.
        key: &'static str,
        /// Rejected value.
        value: String,
    },
}

/// Runtime configuration for the task server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Postgres connection string.
    pub database_url: String,
    /// Address the HTTP listener binds.
    pub bind_addr: SocketAddr,
    /// Upper bound on pooled connections.
    pub pool_max_size: u32,
    /// Fallback tracing filter directive.
    pub log_filter: String,
}

impl AppConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a
    /// value does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a
    /// value does not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &'static str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let database_url = read(DATABASE_URL_KEY).ok_or(ConfigError::Missing(DATABASE_URL_KEY))?;

        let bind_addr = match read(BIND_ADDR_KEY) {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                key: BIND_ADDR_KEY,
                value,
            })?,
            None => default_bind_addr(),
        };

        let pool_max_size = match read(POOL_MAX_SIZE_KEY) {
            Some(value) => match value.parse::<u32>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: POOL_MAX_SIZE_KEY,
                        value,
                    });
                }
            },
            None => DEFAULT_POOL_MAX_SIZE,
        };

        let log_filter = read(LOG_FILTER_KEY).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned());

        Ok(Self {
            database_url,
            bind_addr,
            pool_max_size,
            log_filter,
        })
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        move |key| values.get(key).cloned()
    }

    #[rstest]
    fn defaults_apply_when_only_database_url_is_set() {
        let config = AppConfig::from_lookup(lookup_from(&[(
            DATABASE_URL_KEY,
            "postgres://localhost/tasks",
        )]))
        .expect("config loads");

        assert_eq!(config.database_url, "postgres://localhost/tasks");
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.pool_max_size, DEFAULT_POOL_MAX_SIZE);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[rstest]
    fn explicit_values_override_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (DATABASE_URL_KEY, "postgres://db/tasks"),
            (BIND_ADDR_KEY, "127.0.0.1:9000"),
            (POOL_MAX_SIZE_KEY, " 4 "),
            (LOG_FILTER_KEY, "tasktrack=debug"),
        ]))
        .expect("config loads");

        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:9000");
        assert_eq!(config.pool_max_size, 4);
        assert_eq!(config.log_filter, "tasktrack=debug");
    }

    #[rstest]
    #[case(&[])]
    #[case(&[(DATABASE_URL_KEY, "   ")])]
    fn database_url_is_required(#[case] pairs: &[(&str, &str)]) {
        let result = AppConfig::from_lookup(lookup_from(pairs));
        assert_eq!(result, Err(ConfigError::Missing(DATABASE_URL_KEY)));
    }

    #[rstest]
    #[case(POOL_MAX_SIZE_KEY, "0")]
    #[case(POOL_MAX_SIZE_KEY, "-3")]
    #[case(POOL_MAX_SIZE_KEY, "many")]
    #[case(BIND_ADDR_KEY, "localhost")]
    fn malformed_values_are_rejected(#[case] key: &'static str, #[case] value: &str) {
        let result = AppConfig::from_lookup(lookup_from(&[
            (DATABASE_URL_KEY, "postgres://db/tasks"),
            (key, value),
        ]));

        assert_eq!(
            result,
            Err(ConfigError::Invalid {
                key,
                value: value.to_owned(),
            })
        );
    }
}
