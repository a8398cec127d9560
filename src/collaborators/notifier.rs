//! # Notifier
//!
//! Transient, non-blocking messages shown once per failed attempt (a toast).
//! Notices are never stored in view state.

use tracing::warn;

use crate::framework::FetchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    NoConnectivity,
    ServerTimeout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn no_connectivity() -> Self {
        Self {
            kind: NoticeKind::NoConnectivity,
            message: "No internet connection".to_string(),
        }
    }

    pub fn server_timeout() -> Self {
        Self {
            kind: NoticeKind::ServerTimeout,
            message: "Server Timeout".to_string(),
        }
    }
}

impl From<&FetchError> for Notice {
    // Every failed request shows the same toast; the reason stays in the view state.
    fn from(error: &FetchError) -> Self {
        match error {
            FetchError::NoConnectivity => Notice::no_connectivity(),
            FetchError::Timeout | FetchError::RequestFailed(_) => Notice::server_timeout(),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Writes notices to the log. Used when no UI layer is attached.
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        warn!(kind = ?notice.kind, message = %notice.message, "Notice");
    }
}
