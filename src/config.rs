use std::path::PathBuf;

use serde::Deserialize;

const DEFAULT_API_URL: &str = "http://localhost:5000";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Base URL of the NutriCheck backend, no trailing slash.
    pub api_url: String,
    /// Directory holding the session file.
    pub data_dir: PathBuf,
    pub http_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_url = std::env::var("NUTRICHECK_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.into())
            .trim_end_matches('/')
            .to_string();
        let data_dir = std::env::var("NUTRICHECK_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_dir());
        let http_timeout_secs = std::env::var("NUTRICHECK_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);
        Ok(Self {
            api_url,
            data_dir,
            http_timeout_secs,
        })
    }
}

// $XDG_DATA_HOME/nutricheck, ~/.local/share/nutricheck, or ./.nutricheck
fn default_data_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg).join("nutricheck");
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("nutricheck");
    }
    PathBuf::from(".nutricheck")
}
