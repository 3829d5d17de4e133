//! Notification collaborator interface.
//!
//! The pipeline never renders toasts itself; it hands (message, severity,
//! duration) to an injected [`Notifier`] and moves on. The default
//! [`TracingNotifier`] routes notices into the log stream for headless use.

use std::time::Duration;

use tracing::{error, info, warn};

/// Severity attached to a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl Severity {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

/// Sink for transient user-facing notices.
///
/// `duration` is a display hint (auto-dismiss time); implementations may
/// ignore it.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity, duration: Option<Duration>);

    fn success(&self, message: &str) {
        self.notify(message, Severity::Success, None);
    }

    fn warning(&self, message: &str) {
        self.notify(message, Severity::Warning, None);
    }

    fn error(&self, message: &str) {
        self.notify(message, Severity::Error, None);
    }
}

/// Notifier that forwards notices to the `tracing` log stream.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, severity: Severity, _duration: Option<Duration>) {
        match severity {
            Severity::Success | Severity::Info => info!(notice = severity.label(), "{message}"),
            Severity::Warning => warn!(notice = severity.label(), "{message}"),
            Severity::Error => error!(notice = severity.label(), "{message}"),
        }
    }
}
