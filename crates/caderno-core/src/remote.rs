//! Remote failure model shared by every API binding.
//!
//! The service reports failures as a status code plus an optional structured
//! `detail` message. Every call site needs the same rule (show the detail
//! when present, a fixed fallback otherwise), so the rule lives here once.

use thiserror::Error;

/// A failure reported by the remote service or the transport beneath it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// The request never completed: connection refused, timeout, DNS, a
    /// response body that could not be decoded.
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("remote call failed with status {status}")]
    Api {
        status: u16,
        /// Human-readable message extracted from the error body, when the
        /// service provided one.
        detail: Option<String>,
    },
}

impl RemoteError {
    /// Creates an `Api` error.
    pub fn api(status: u16, detail: Option<String>) -> Self {
        Self::Api { status, detail }
    }

    /// Creates a `Transport` error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// The service-provided detail message, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Api { detail, .. } => detail.as_deref(),
            Self::Transport(_) => None,
        }
    }

    /// The message to show the user: the service detail when present,
    /// `fallback` otherwise.
    pub fn message_or(&self, fallback: &str) -> String {
        self.detail()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string())
    }

    /// The HTTP status code, when the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(_) => None,
        }
    }
}

/// A type alias for `Result<T, RemoteError>`.
pub type RemoteResult<T> = std::result::Result<T, RemoteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_or_prefers_detail() {
        let err = RemoteError::api(401, Some("Invalid credentials".to_string()));
        assert_eq!(err.message_or("failed to sign in"), "Invalid credentials");
    }

    #[test]
    fn test_message_or_falls_back_without_detail() {
        let err = RemoteError::api(500, None);
        assert_eq!(err.message_or("failed to sign in"), "failed to sign in");
    }

    #[test]
    fn test_transport_error_has_no_detail() {
        let err = RemoteError::transport("connection refused");
        assert!(err.detail().is_none());
        assert_eq!(err.message_or("operation failed"), "operation failed");
        assert!(err.status().is_none());
    }
}
