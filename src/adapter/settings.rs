//! Data source configuration.

use std::path::PathBuf;

use serde::Deserialize;

/// Where player data comes from and how it is fetched.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the public fantasy API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connect timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// How long the bootstrap snapshot and fixture list stay cached.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Attempts per request, counting the first.
    #[serde(default = "default_retry_max_attempts")]
    pub retry_max_attempts: u32,

    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Read from this JSON snapshot instead of the network.
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,
}

fn default_base_url() -> String {
    "https://fantasy.premierleague.com/api".into()
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_connect_timeout_secs() -> u64 {
    5
}

const fn default_cache_ttl_secs() -> u64 {
    3600
}

const fn default_retry_max_attempts() -> u32 {
    2
}

const fn default_retry_backoff_ms() -> u64 {
    250
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            cache_ttl_secs: default_cache_ttl_secs(),
            retry_max_attempts: default_retry_max_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
            snapshot_path: None,
        }
    }
}
