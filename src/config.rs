//! Runtime configuration loaded from the environment (and an optional `.env`).

use std::env;

use anyhow::{Context, Result};
use reqwest::Url;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the GitHub REST API.
    pub api_url: Url,
    /// Sent as `User-Agent`, which GitHub requires on every request.
    pub user_agent: String,
    /// Filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            user_agent: default_user_agent(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Loads `.env` when present, then reads `GIT_STARE_*` variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source. Empty values count
    /// as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = match get("GIT_STARE_API_URL") {
            Some(raw) => Url::parse(raw.trim())
                .with_context(|| format!("Invalid GIT_STARE_API_URL: {raw}"))?,
            None => Url::parse(DEFAULT_API_URL).context("Invalid default API URL")?,
        };

        Ok(Self {
            api_url,
            user_agent: get("GIT_STARE_USER_AGENT").unwrap_or_else(default_user_agent),
            log_filter: get("GIT_STARE_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }

    /// Config pointing at another API base, used against mock servers.
    pub fn with_api_url(api_url: &str) -> Result<Self> {
        Ok(Self {
            api_url: Url::parse(api_url).with_context(|| format!("Invalid API URL: {api_url}"))?,
            ..Self::default()
        })
    }
}

fn default_user_agent() -> String {
    format!("git-stare/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_url.as_str(), "https://api.github.com/");
        assert!(config.user_agent.starts_with("git-stare/"));
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("GIT_STARE_API_URL", "http://127.0.0.1:9000"),
            ("GIT_STARE_USER_AGENT", "tester"),
            ("GIT_STARE_LOG", "debug"),
        ]))
        .unwrap();
        assert_eq!(config.api_url.as_str(), "http://127.0.0.1:9000/");
        assert_eq!(config.user_agent, "tester");
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup(&[("GIT_STARE_USER_AGENT", "  ")])).unwrap();
        assert!(config.user_agent.starts_with("git-stare/"));
    }

    #[test]
    fn rejects_invalid_api_url() {
        let err = Config::from_lookup(lookup(&[("GIT_STARE_API_URL", "not a url")])).unwrap_err();
        assert!(err.to_string().contains("GIT_STARE_API_URL"));
    }
}
