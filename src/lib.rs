//! Prithu header - client-side logic behind the app's navigation header
//!
//! This library provides global search (ranking, history, debounced dispatch),
//! the grouped notification dropdown and the jobs board filters, all driven
//! through an injectable remote API.

pub mod api;
pub mod config;
pub mod error;
pub mod jobs;
pub mod logging;
pub mod notifications;
pub mod search;
pub mod toast;
