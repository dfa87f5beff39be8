use std::path::PathBuf;

use serde::Deserialize;

/// Client configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the CineFlix backend
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// File backing the local key/value namespace
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,

    /// Upper bound on the bytes held by the local namespace
    #[serde(default = "default_storage_quota_bytes")]
    pub storage_quota_bytes: usize,

    /// Timeout applied to every backend request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_state_file() -> PathBuf {
    PathBuf::from(".cineflix/local_storage.json")
}

fn default_storage_quota_bytes() -> usize {
    5 * 1024 * 1024
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            state_file: default_state_file(),
            storage_quota_bytes: default_storage_quota_bytes(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
