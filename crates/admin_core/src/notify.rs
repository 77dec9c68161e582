//! Outcome notification seam. Presentation (toast, banner, status line) lives
//! with the page; the core only emits.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

pub trait NotificationSink: Send + Sync {
    fn notify(&self, message: &str, kind: NotificationKind);
}

/// Drops every notification. For pages that surface outcomes another way.
pub struct SilentNotifier;

impl NotificationSink for SilentNotifier {
    fn notify(&self, _message: &str, _kind: NotificationKind) {}
}

/// Forwards notifications to the tracing pipeline; the console binary's sink.
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn notify(&self, message: &str, kind: NotificationKind) {
        match kind {
            NotificationKind::Success => tracing::info!(outcome = %message, "notification"),
            NotificationKind::Error => tracing::warn!(outcome = %message, "notification"),
        }
    }
}
