//! Default configuration values
//!
//! All constants used throughout the config module are defined here.

/// Base URL of the remote header API
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

/// Trailing-edge debounce for global search requests (milliseconds)
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

/// Maximum number of search history entries kept
pub const DEFAULT_HISTORY_LIMIT: usize = 12;

/// Namespace key the search history is stored under
pub const SEARCH_HISTORY_KEY: &str = "prithu_search_history_v1";

/// HTTP timeout for remote calls (milliseconds)
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Default storage locations (tilde-expanded at load time)
pub const DEFAULT_CONFIG_PATH: &str = "~/.prithu/config.json";
pub const DEFAULT_HISTORY_PATH: &str = "~/.prithu/search_history.json";
pub const DEFAULT_LOG_DIR: &str = "~/.prithu/logs";

/// Environment variable that overrides the configured bearer token
pub const AUTH_TOKEN_ENV: &str = "PRITHU_API_TOKEN";
