//! Structured JSONL logging plus human-readable stderr output.
//!
//! - **JSONL to file** (`~/.prithu/logs/prithu-header.jsonl`) for tooling
//! - **Compact to stderr** for developers
//!
//! # Usage
//!
//! ```rust,ignore
//! use prithu_header::logging;
//!
//! // MUST keep guard alive for duration of program
//! let _guard = logging::init(&config.get_log_dir());
//!
//! tracing::info!(event_type = "search", query_len = 3, "Search issued");
//! ```

use std::fs::{self, OpenOptions};
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

const LOG_FILE_NAME: &str = "prithu-header.jsonl";

/// Guard that must be kept alive for the duration of the program.
/// Dropping this guard will flush and close the log file.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize the dual-output logging system.
///
/// If the log file can't be opened, only the stderr layer is installed.
pub fn init(log_dir: &Path) -> LoggingGuard {
    if let Err(e) = fs::create_dir_all(log_dir) {
        eprintln!("[LOGGING] Failed to create log directory: {}", e);
    }

    let log_path = log_dir.join(LOG_FILE_NAME);

    // Environment filter - default to info, allow override via RUST_LOG
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,ureq=warn"));

    let file = OpenOptions::new().create(true).append(true).open(&log_path);

    let file_guard = match file {
        Ok(file) => {
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file);

            let json_layer = fmt::layer()
                .json()
                .with_writer(non_blocking_file)
                .with_timer(fmt::time::UtcTime::rfc_3339())
                .with_target(true)
                .with_level(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_file(false)
                .with_line_number(false)
                .with_span_events(FmtSpan::NONE);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(json_layer)
                .with(stderr_layer())
                .init();
            Some(guard)
        }
        Err(e) => {
            eprintln!("[LOGGING] Failed to open log file: {}", e);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(stderr_layer())
                .init();
            None
        }
    };

    tracing::info!(
        event_type = "app_lifecycle",
        action = "started",
        log_path = %log_path.display(),
        "Logging initialized"
    );

    LoggingGuard {
        _file_guard: file_guard,
    }
}

/// Compact human-readable layer for stderr
fn stderr_layer<S>() -> impl Layer<S>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .compact()
}

/// Log a UI event with structured fields
pub fn log_ui_event(component: &str, action: &str, details: Option<&str>) {
    tracing::info!(
        event_type = "ui_event",
        component = component,
        action = action,
        details = details,
        "{} {}",
        component,
        action
    );
}

/// Log a key press that the header reacted to
pub fn log_key_event(key: &str, action: &str) {
    tracing::debug!(
        event_type = "key_event",
        key = key,
        action = action,
        "Key {} {}",
        action,
        key
    );
}

/// Log a remote call outcome with its latency
pub fn log_api_call(endpoint: &str, duration_ms: u64, success: bool) {
    if success {
        tracing::debug!(
            event_type = "api_call",
            endpoint = endpoint,
            duration_ms = duration_ms,
            success = true,
            "{} completed in {}ms",
            endpoint,
            duration_ms
        );
    } else {
        tracing::warn!(
            event_type = "api_call",
            endpoint = endpoint,
            duration_ms = duration_ms,
            success = false,
            "{} failed after {}ms",
            endpoint,
            duration_ms
        );
    }
}
