use std::env;
use std::fmt::Display;
use std::str::FromStr;

use anyhow::{anyhow, bail, Result};

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Path serving GraphQL POST requests and the GraphiQL page.
    pub graphql_path: String,
    pub introspection: bool,
    pub depth_limit: Option<usize>,
    pub complexity_limit: Option<usize>,
    /// Length of lists that have no mock of their own.
    pub mock_list_length: usize,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
            graphql_path: "/".to_string(),
            introspection: true,
            depth_limit: None,
            complexity_limit: None,
            mock_list_length: 2,
            request_timeout_secs: 30,
        }
    }
}

/// Routes served next to GraphQL; `GRAPHQL_PATH` may not reuse them.
pub const HEALTH_PATH: &str = "/health";
pub const SDL_PATH: &str = "/schema.graphql";

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any variable source; `from_env` reads the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_var(&lookup, "PORT", defaults.port)?,
            graphql_path: lookup("GRAPHQL_PATH").unwrap_or(defaults.graphql_path),
            introspection: parse_var(&lookup, "GQL_INTROSPECTION", defaults.introspection)?,
            depth_limit: parse_optional_var(&lookup, "GQL_DEPTH_LIMIT")?,
            complexity_limit: parse_optional_var(&lookup, "GQL_COMPLEXITY_LIMIT")?,
            mock_list_length: parse_var(&lookup, "MOCK_LIST_LENGTH", defaults.mock_list_length)?,
            request_timeout_secs: parse_var(
                &lookup,
                "REQUEST_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the router cannot serve.
    pub fn validate(&self) -> Result<()> {
        let path = &self.graphql_path;
        if !path.starts_with('/') {
            bail!("GRAPHQL_PATH must start with '/', got {path:?}");
        }
        if path.contains(['{', '}', ':', '*']) {
            bail!("GRAPHQL_PATH must be a literal path, got {path:?}");
        }
        if [HEALTH_PATH, SDL_PATH].contains(&path.as_str()) {
            bail!("GRAPHQL_PATH {path:?} is already served by another route");
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T>(lookup: impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    Ok(parse_optional_var(lookup, key)?.unwrap_or(default))
}

fn parse_optional_var<T>(lookup: impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| anyhow!("invalid value for {key} ({raw:?}): {e}")),
        None => Ok(None),
    }
}
