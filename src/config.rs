use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use dotenvy::dotenv;

use crate::wiki::client::{DEFAULT_API_URL, DEFAULT_LIMIT, DEFAULT_USER_AGENT};
use crate::wiki::{ClientConfig, EnrichmentPolicy};

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Debug, Clone)]
pub struct Config {
    pub wiki_api_url: String,
    pub search_limit: u32,
    pub http_timeout: Option<Duration>,
    pub user_agent: String,
    pub strict_enrichment: bool,
    pub bind_addr: SocketAddr,
    pub static_dir: PathBuf,
}

impl Config {
    /// Load from the process environment, after reading `.env` if present.
    pub fn from_env() -> Result<Config> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs: Option<u64> = get_parsed(&lookup, "WIKI_HTTP_TIMEOUT_SECS")?;
        Ok(Config {
            wiki_api_url: get_or_default(&lookup, "WIKI_API_URL", DEFAULT_API_URL),
            search_limit: get_parsed(&lookup, "WIKI_SEARCH_LIMIT")?.unwrap_or(DEFAULT_LIMIT),
            http_timeout: timeout_secs.filter(|s| *s > 0).map(Duration::from_secs),
            user_agent: get_or_default(&lookup, "WIKI_USER_AGENT", DEFAULT_USER_AGENT),
            strict_enrichment: get_bool(&lookup, "WIKI_STRICT_ENRICHMENT")?.unwrap_or(false),
            bind_addr: get_parsed(&lookup, "BIND_ADDR")?
                .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 3000))),
            static_dir: PathBuf::from(get_or_default(&lookup, "STATIC_DIR", DEFAULT_STATIC_DIR)),
        })
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.wiki_api_url.clone(),
            limit: self.search_limit,
            timeout: self.http_timeout,
            user_agent: self.user_agent.clone(),
            enrichment: if self.strict_enrichment {
                EnrichmentPolicy::Strict
            } else {
                EnrichmentPolicy::Degrade
            },
        }
    }
}

fn get_or_default<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn get_parsed<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key).filter(|v| !v.trim().is_empty()) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("Invalid value for environment variable {key}: {raw:?}")),
        None => Ok(None),
    }
}

fn get_bool<F>(lookup: &F, key: &str) -> Result<Option<bool>>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key).filter(|v| !v.trim().is_empty()) else {
        return Ok(None);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => anyhow::bail!("Invalid value for environment variable {key}: {raw:?}"),
    }
}
