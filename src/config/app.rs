//! Service configuration from environment variables (optionally seeded from `.env`).

use crate::error::ConfigError;
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub http_port: u16,
    pub database_url: String,
    pub max_connections: u32,
    pub request_timeout: Duration,
    /// Attempts made to open the pool at startup before giving up.
    pub connect_retries: u32,
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if dotenvy::dotenv().is_err() {
            tracing::debug!("no .env file found");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. `DATABASE_URL` wins over the `DB_*` parts.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database_url = match lookup("DATABASE_URL").filter(|s| !s.trim().is_empty()) {
            Some(url) => url,
            None => format!(
                "postgres://{}:{}@{}:{}/{}?sslmode=disable",
                get("DB_USER", "user"),
                get("DB_PASSWORD", "password"),
                get("DB_HOST", "localhost"),
                get("DB_PORT", "5432"),
                get("DB_NAME", "dbname"),
            ),
        };

        Ok(AppConfig {
            http_port: parse_var(&lookup, "HTTP_PORT", 8080)?,
            database_url,
            max_connections: parse_var(&lookup, "DB_MAX_CONNECTIONS", 5)?,
            request_timeout: Duration::from_secs(positive_var(&lookup, "REQUEST_TIMEOUT_SECS", 30)?),
            connect_retries: parse_var::<u32, _>(&lookup, "DB_CONNECT_RETRIES", 3)?.max(1),
        })
    }
}

fn parse_var<T, F>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value: raw }),
    }
}

/// Like `parse_var`, but zero is rejected.
fn positive_var<F>(lookup: &F, var: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match parse_var(lookup, var, default)? {
        0 => Err(ConfigError::Invalid {
            var,
            value: "0".into(),
        }),
        n => Ok(n),
    }
}
