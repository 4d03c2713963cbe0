// Server configuration
//
// All settings come from environment variables (a `.env` file is loaded by the
// binary through dotenvy before this runs).

use std::net::SocketAddr;
use std::time::Duration;

use axum::http::HeaderValue;
use thiserror::Error;

pub const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_GRPC_ADDR: &str = "0.0.0.0:9001";
pub const DEFAULT_API_PREFIX: &str = "/api";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}' ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(var: &'static str, value: &str, reason: impl ToString) -> Self {
        ConfigError::Invalid {
            var,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Runtime configuration for the server binary
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub http_addr: SocketAddr,
    pub grpc_addr: SocketAddr,
    /// Postgres connection string; `None` selects the in-memory store
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    /// Prefix for API routes, e.g. "/api" gives "/api/v1/events"
    pub api_prefix: String,
    /// Origins allowed by CORS; empty means same-origin only
    pub cors_allowed_origins: Vec<HeaderValue>,
    pub store_timeout: Duration,
    /// Insert the sample events on startup when the store is empty
    pub seed_sample_events: bool,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let http_addr = parse_addr("HTTP_ADDR", get("HTTP_ADDR"), DEFAULT_HTTP_ADDR)?;
        let grpc_addr = parse_addr("GRPC_ADDR", get("GRPC_ADDR"), DEFAULT_GRPC_ADDR)?;

        let database_max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(v) => match v.trim().parse::<u32>() {
                Ok(0) => {
                    return Err(ConfigError::invalid(
                        "DATABASE_MAX_CONNECTIONS",
                        &v,
                        "must be greater than zero",
                    ))
                }
                Ok(n) => n,
                Err(e) => return Err(ConfigError::invalid("DATABASE_MAX_CONNECTIONS", &v, e)),
            },
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let store_timeout_ms = match get("STORE_TIMEOUT_MS") {
            Some(v) => match v.trim().parse::<u64>() {
                Ok(0) => {
                    return Err(ConfigError::invalid(
                        "STORE_TIMEOUT_MS",
                        &v,
                        "must be greater than zero",
                    ))
                }
                Ok(n) => n,
                Err(e) => return Err(ConfigError::invalid("STORE_TIMEOUT_MS", &v, e)),
            },
            None => DEFAULT_STORE_TIMEOUT_MS,
        };

        // API_PREFIX may be set to an empty string explicitly to serve routes at the root
        let api_prefix = match lookup("API_PREFIX") {
            Some(v) => normalize_prefix(&v),
            None => DEFAULT_API_PREFIX.to_string(),
        };

        let cors_allowed_origins = match get("CORS_ALLOWED_ORIGINS") {
            Some(v) => parse_origins(&v)?,
            None => Vec::new(),
        };

        let seed_sample_events = match get("SEED_SAMPLE_EVENTS") {
            Some(v) => parse_bool("SEED_SAMPLE_EVENTS", &v)?,
            None => false,
        };

        Ok(Self {
            http_addr,
            grpc_addr,
            database_url: get("DATABASE_URL"),
            database_max_connections,
            api_prefix,
            cors_allowed_origins,
            store_timeout: Duration::from_millis(store_timeout_ms),
            seed_sample_events,
        })
    }
}

fn parse_addr(
    var: &'static str,
    value: Option<String>,
    default: &str,
) -> Result<SocketAddr, ConfigError> {
    let value = value.unwrap_or_else(|| default.to_string());
    value
        .trim()
        .parse()
        .map_err(|e| ConfigError::invalid(var, &value, e))
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid(var, value, "expected true or false")),
    }
}

fn parse_origins(value: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|e| ConfigError::invalid("CORS_ALLOWED_ORIGINS", origin, e))
        })
        .collect()
}

/// "api/" -> "/api", "/" -> ""
fn normalize_prefix(value: &str) -> String {
    let trimmed = value.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
