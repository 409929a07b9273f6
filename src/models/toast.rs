use serde::Serialize;
use time::{Duration, OffsetDateTime};

/// How long a toast stays visible before the UI drops it.
pub const TOAST_TTL: Duration = Duration::seconds(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastSeverity {
    Success,
    Warning,
    Error,
}

/// Single-slot transient notification. A newer toast simply overwrites the
/// slot; expiry is checked against "now" instead of running a timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub message: String,
    pub severity: ToastSeverity,
    #[serde(with = "time::serde::rfc3339")]
    pub raised_at: OffsetDateTime,
}

impl Toast {
    pub fn success(message: impl Into<String>, now: OffsetDateTime) -> Self {
        Self::new(message, ToastSeverity::Success, now)
    }

    pub fn warning(message: impl Into<String>, now: OffsetDateTime) -> Self {
        Self::new(message, ToastSeverity::Warning, now)
    }

    pub fn error(message: impl Into<String>, now: OffsetDateTime) -> Self {
        Self::new(message, ToastSeverity::Error, now)
    }

    fn new(message: impl Into<String>, severity: ToastSeverity, now: OffsetDateTime) -> Self {
        Self {
            message: message.into(),
            severity,
            raised_at: now,
        }
    }

    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        now - self.raised_at >= TOAST_TTL
    }
}
