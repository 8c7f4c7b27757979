//! User notification seam
//!
//! The rewrite workflow reports soft failures and per-replacement
//! confirmations through this trait instead of returning them, so hosts
//! (CLI, editor plugin, tests) decide how messages surface.

use std::sync::Mutex;

/// Fire-and-forget user notifications
pub trait Notifier: Send + Sync {
    /// Informational message (e.g. a replacement was performed)
    fn info(&self, message: &str);

    /// Warning (e.g. a referenced local image does not exist)
    fn warning(&self, message: &str);

    /// Error (e.g. the edit transaction failed)
    fn error(&self, message: &str);
}

/// Notification severity, used by [`MemoryNotifier`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A recorded notification
#[derive(Debug, Clone)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

/// Notifier that records messages in memory, for tests and embedders
/// that want to inspect what the workflow reported.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    messages: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded notifications, in emission order
    pub fn messages(&self) -> Vec<Notification> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }

    /// Recorded messages of one severity
    pub fn messages_with(&self, severity: Severity) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|n| n.severity == severity)
            .map(|n| n.message)
            .collect()
    }

    fn record(&self, severity: Severity, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(Notification {
                severity,
                message: message.to_string(),
            });
        }
    }
}

impl Notifier for MemoryNotifier {
    fn info(&self, message: &str) {
        self.record(Severity::Info, message);
    }

    fn warning(&self, message: &str) {
        self.record(Severity::Warning, message);
    }

    fn error(&self, message: &str) {
        self.record(Severity::Error, message);
    }
}
