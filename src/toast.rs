//! Transient user-visible messages
//!
//! Header operations push toasts here; whatever renders the header drains
//! them. Toasts carry a variant (for colour and icon) and an auto-dismiss
//! duration, nothing presentation-specific.

use std::collections::VecDeque;

use serde::Serialize;
use tracing::debug;

use crate::error::{ErrorSeverity, HeaderError};

/// Default auto-dismiss duration
pub const DEFAULT_TOAST_DURATION_MS: u64 = 3000;

/// Toast variant determines the icon and accent colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    Success,
    Warning,
    Error,
    #[default]
    Info,
}

impl ToastVariant {
    pub fn icon(&self) -> &'static str {
        match self {
            ToastVariant::Success => "✓",
            ToastVariant::Warning => "⚠",
            ToastVariant::Error => "✕",
            ToastVariant::Info => "ℹ",
        }
    }

    pub fn from_severity(severity: ErrorSeverity) -> Self {
        match severity {
            ErrorSeverity::Info => ToastVariant::Info,
            ErrorSeverity::Warning => ToastVariant::Warning,
            ErrorSeverity::Error => ToastVariant::Error,
            ErrorSeverity::Critical => ToastVariant::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Toast {
    pub id: u64,
    pub variant: ToastVariant,
    pub message: String,
    /// None = stays until dismissed
    pub duration_ms: Option<u64>,
}

/// FIFO of toasts waiting to be shown
#[derive(Debug, Default)]
pub struct ToastManager {
    pending: VecDeque<Toast>,
    next_id: u64,
}

impl ToastManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a toast and return its id
    pub fn push(&mut self, variant: ToastVariant, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let toast = Toast {
            id: self.next_id,
            variant,
            message: message.into(),
            duration_ms: Some(DEFAULT_TOAST_DURATION_MS),
        };
        debug!(toast_id = toast.id, variant = ?toast.variant, message = %toast.message, "Toast queued");
        self.pending.push_back(toast);
        self.next_id
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(ToastVariant::Success, message)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(ToastVariant::Error, message)
    }

    pub fn info(&mut self, message: impl Into<String>) -> u64 {
        self.push(ToastVariant::Info, message)
    }

    /// Toast for a domain error; critical errors stay until dismissed
    pub fn push_error(&mut self, context: &str, error: &HeaderError) -> u64 {
        let severity = error.severity();
        let id = self.push(
            ToastVariant::from_severity(severity),
            format!("{}: {}", context, error.user_message()),
        );
        if severity == ErrorSeverity::Critical {
            if let Some(toast) = self.pending.back_mut() {
                toast.duration_ms = None;
            }
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.pending.retain(|t| t.id != id);
    }

    pub fn pending(&self) -> impl Iterator<Item = &Toast> {
        self.pending.iter()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take every queued toast, oldest first
    pub fn drain(&mut self) -> Vec<Toast> {
        self.pending.drain(..).collect()
    }
}
