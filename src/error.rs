use thiserror::Error;
use tracing::{error, warn};

/// Error severity for UI display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,     // Blue - informational
    Warning,  // Yellow - recoverable
    Error,    // Red - operation failed
    Critical, // Red + sticky toast - requires user action
}

/// Domain-specific errors for the header client
#[derive(Error, Debug)]
pub enum HeaderError {
    #[error("Request to {endpoint} failed: {message}")]
    Network { endpoint: String, message: String },

    #[error("Server rejected {endpoint} with status {status}")]
    Status { endpoint: String, status: u16 },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Notification {0} not found")]
    NotificationNotFound(String),
}

impl HeaderError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Network { .. } => ErrorSeverity::Error,
            Self::Status { status, .. } if *status == 401 || *status == 403 => {
                ErrorSeverity::Critical
            }
            Self::Status { .. } => ErrorSeverity::Error,
            Self::Decode(_) => ErrorSeverity::Warning,
            Self::NotificationNotFound(_) => ErrorSeverity::Info,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Network { .. } => "Could not reach the server".to_string(),
            Self::Status { status, .. } if *status == 401 || *status == 403 => {
                "Your session has expired, please sign in again".to_string()
            }
            Self::Status { status, .. } => format!("Server error ({})", status),
            Self::Decode(_) => "Received an unexpected response".to_string(),
            Self::NotificationNotFound(_) => "Notification no longer exists".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HeaderError>;

/// Extension trait for silent error logging with caller location tracking.
/// Use when the operation is recoverable and the user doesn't need to know.
///
/// # Examples
///
/// ```ignore
/// use prithu_header::error::ResultExt;
///
/// // Fall back to an empty list if the fetch fails
/// let list = api.fetch_notifications().log_err().unwrap_or_default();
/// ```
pub trait ResultExt<T> {
    /// Log error with caller location and return None. Use for recoverable failures.
    fn log_err(self) -> Option<T>;
    /// Log as warning with caller location and return None. Use for expected failures.
    fn warn_on_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Debug> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn log_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                error!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation failed"
                );
                None
            }
        }
    }

    #[track_caller]
    fn warn_on_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                warn!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation had warning"
                );
                None
            }
        }
    }
}
