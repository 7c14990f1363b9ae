//! Runtime configuration from environment variables.

use crate::error::ConfigError;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/campus";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub database_url: String,
    /// Shared bearer token; every gated route compares against it.
    pub api_secret: String,
    pub bind_addr: String,
    pub max_connections: u32,
    pub body_limit: usize,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build config from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_secret = lookup("API_SECRET")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("API_SECRET"))?;
        let max_connections = parse_or("DB_MAX_CONNECTIONS", &lookup, DEFAULT_MAX_CONNECTIONS)?;
        let body_limit = parse_or("BODY_LIMIT_BYTES", &lookup, DEFAULT_BODY_LIMIT)?;
        Ok(Self {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            api_secret,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
            max_connections,
            body_limit,
        })
    }
}

fn parse_or<F, T>(name: &'static str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
    }
}
