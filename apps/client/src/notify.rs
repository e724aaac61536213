//! Notification collaborator — the session reports human-readable
//! outcomes here and nowhere else. The presentation layer supplies its
//! own sink (toast, status bar, ...); the default logs through tracing.

use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// One user-facing message: a short title plus a longer detail line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub title: String,
    pub detail: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            title: title.into(),
            detail: detail.into(),
        }
    }

    pub fn error(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            title: title.into(),
            detail: detail.into(),
        }
    }
}

/// Receives success/error messages from the session. Not part of the
/// orchestration core; implementations must not mutate session state.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Default sink: structured log lines.
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notice: Notice) {
        match notice.severity {
            Severity::Info => info!(title = %notice.title, "{}", notice.detail),
            Severity::Error => error!(title = %notice.title, "{}", notice.detail),
        }
    }
}
