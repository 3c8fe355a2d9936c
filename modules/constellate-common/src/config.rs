use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{ConstellateError, Result};

/// Runtime configuration loaded from environment variables (and `.env` if present).
/// The API is public and read-only, so nothing here is secret.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    // Are.na API
    pub api_base: String,
    pub per_page: u32,
    pub request_timeout_secs: u64,

    // Pipeline
    pub concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: arena_client::DEFAULT_BASE_URL.to_string(),
            per_page: arena_client::DEFAULT_PER_PAGE,
            request_timeout_secs: 30,
            concurrency: 1,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Missing keys fall back to defaults;
    /// present but unparseable values are an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            api_base: lookup("ARENA_API_BASE").unwrap_or(defaults.api_base),
            per_page: parse_or(&lookup, "ARENA_PER_PAGE", defaults.per_page)?,
            request_timeout_secs: parse_or(
                &lookup,
                "ARENA_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            )?,
            concurrency: parse_or(&lookup, "CONSTELLATE_CONCURRENCY", defaults.concurrency)?,
        };

        if config.per_page == 0 {
            return Err(ConstellateError::Config(
                "ARENA_PER_PAGE must be greater than zero".to_string(),
            ));
        }
        if config.concurrency == 0 {
            return Err(ConstellateError::Config(
                "CONSTELLATE_CONCURRENCY must be greater than zero".to_string(),
            ));
        }

        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn log_redacted(&self) {
        tracing::info!(
            api_base = self.api_base.as_str(),
            per_page = self.per_page,
            timeout_secs = self.request_timeout_secs,
            concurrency = self.concurrency,
            "Config loaded"
        );
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConstellateError::Config(format!("{key} must be a number, got {raw:?}"))),
        None => Ok(default),
    }
}
