//! Server configuration read from the environment.
//!
//! Environment variables (a `.env` file is honored by the binary):
//!
//! | Variable             | Default                      |
//! |----------------------|------------------------------|
//! | `DATABASE_URL`       | `sqlite://quill.db?mode=rwc` |
//! | `HOST`               | `0.0.0.0`                    |
//! | `PORT`               | `3000`                       |
//! | `DB_MAX_CONNECTIONS` | `10`                         |
//! | `ALLOWED_ORIGINS`    | `http://localhost:3000`      |
//! | `MAX_BODY_BYTES`     | `1048576`                    |
//! | `LOG_FORMAT`         | `text` (`json` also accepted)|
//! | `LOG_FILE`           | unset (stdout only)          |
//! | `LOG_ANSI`           | auto-detected                |

use std::net::SocketAddr;
use std::str::FromStr;

use axum::http::HeaderValue;
use quill_core::{Error, Result};
use quill_db::pool::DEFAULT_MAX_CONNECTIONS;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://quill.db?mode=rwc";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000";
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub format: LogFormat,
    /// Path of a daily-rolling log file; stdout when `None`.
    pub file: Option<String>,
    /// ANSI color override; auto-detected when `None`.
    pub ansi: Option<bool>,
}

/// Full server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub allowed_origins: Vec<HeaderValue>,
    pub max_body_bytes: usize,
    pub log: LogConfig,
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let log = LogConfig {
            format: match var("LOG_FORMAT").as_deref() {
                Some("json") => LogFormat::Json,
                _ => LogFormat::Text,
            },
            file: var("LOG_FILE"),
            ansi: var("LOG_ANSI").map(|v| v == "true" || v == "1"),
        };

        Ok(Self {
            database_url: var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or("PORT", var("PORT"), DEFAULT_PORT)?,
            db_max_connections: parse_or(
                "DB_MAX_CONNECTIONS",
                var("DB_MAX_CONNECTIONS"),
                DEFAULT_MAX_CONNECTIONS,
            )?,
            allowed_origins: parse_allowed_origins(
                &var("ALLOWED_ORIGINS").unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string()),
            ),
            max_body_bytes: parse_or("MAX_BODY_BYTES", var("MAX_BODY_BYTES"), DEFAULT_MAX_BODY_BYTES)?,
            log,
        })
    }

    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| Error::Config(format!("invalid HOST/PORT: {}", e)))
    }
}

fn parse_or<T: FromStr>(key: &str, value: Option<String>, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("{} must be a number, got `{}`: {}", key, raw, e))),
        None => Ok(default),
    }
}

/// Parse allowed CORS origins from a comma-separated list.
///
/// Entries that are not valid header values are skipped with a warning.
pub fn parse_allowed_origins(origins: &str) -> Vec<HeaderValue> {
    origins
        .split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.db_max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
        assert_eq!(config.allowed_origins.len(), 1);
        assert_eq!(config.log.format, LogFormat::Text);
        assert!(config.log.file.is_none());
        assert!(config.log.ansi.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("DB_MAX_CONNECTIONS", "4"),
            ("LOG_FORMAT", "json"),
            ("LOG_FILE", "/tmp/quill.log"),
            ("LOG_ANSI", "false"),
        ]))
        .unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.port, 8080);
        assert_eq!(config.db_max_connections, 4);
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.log.file.as_deref(), Some("/tmp/quill.log"));
        assert_eq!(config.log.ansi, Some(false));
        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[("PORT", "  "), ("HOST", "")])).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.host, DEFAULT_HOST);
    }

    #[test]
    fn test_invalid_port_is_config_error() {
        let err = ServerConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_parse_allowed_origins_skips_blanks() {
        let origins = parse_allowed_origins("http://a.test, ,http://b.test,");
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[1], "http://b.test");
    }
}
