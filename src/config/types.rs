//! Configuration type definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::defaults::*;

/// Header client settings, read from `~/.prithu/config.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Base URL every endpoint path is appended to
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Bearer token sent with authenticated requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    /// Quiet period before a typed query is sent (default: 300)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_debounce_ms: Option<u64>,
    /// Max history entries (default and upper bound: 12)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_limit: Option<usize>,
    /// HTTP timeout in milliseconds (default: 10000)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_ms: Option<u64>,
    /// Where search history is persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_path: Option<String>,
    /// Directory for the JSONL log
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<String>,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: default_api_base_url(),
            auth_token: None,
            search_debounce_ms: None,
            history_limit: None,
            request_timeout_ms: None,
            history_path: None,
            log_dir: None,
        }
    }
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

impl Config {
    /// Returns the debounce interval, or DEFAULT_SEARCH_DEBOUNCE_MS if not configured
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms.unwrap_or(DEFAULT_SEARCH_DEBOUNCE_MS))
    }

    /// Returns the history cap; zero is treated as unset and values above
    /// DEFAULT_HISTORY_LIMIT are clamped to it
    pub fn get_history_limit(&self) -> usize {
        match self.history_limit {
            Some(0) | None => DEFAULT_HISTORY_LIMIT,
            Some(n) => n.min(DEFAULT_HISTORY_LIMIT),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms.unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS))
    }

    /// Token from PRITHU_API_TOKEN, falling back to the config file
    pub fn get_auth_token(&self) -> Option<String> {
        std::env::var(AUTH_TOKEN_ENV)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| self.auth_token.clone())
    }

    pub fn get_history_path(&self) -> PathBuf {
        expand(self.history_path.as_deref().unwrap_or(DEFAULT_HISTORY_PATH))
    }

    pub fn get_log_dir(&self) -> PathBuf {
        expand(self.log_dir.as_deref().unwrap_or(DEFAULT_LOG_DIR))
    }
}
