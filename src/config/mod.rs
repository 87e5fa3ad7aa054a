//! Configuration module - Client settings
//!
//! # Module Structure
//!
//! - `defaults` - All default constant values
//! - `types` - The `Config` struct and its getters
//! - `loader` - File system loading and parsing

mod defaults;
mod loader;
mod types;

pub use defaults::{
    DEFAULT_API_BASE_URL, DEFAULT_HISTORY_LIMIT, DEFAULT_SEARCH_DEBOUNCE_MS, SEARCH_HISTORY_KEY,
};

pub use types::Config;

pub use loader::{load_config, load_config_from};

#[cfg(test)]
pub use defaults::{AUTH_TOKEN_ENV, DEFAULT_REQUEST_TIMEOUT_MS};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
