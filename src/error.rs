use thiserror::Error;

/// Fallback text shown when the server rejects a request without a message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Failure of a remote fetch or mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never reached the server (offline, DNS, timeout).
    #[error("network error: {0}")]
    Network(String),
    /// The server was reachable but rejected or failed the request.
    #[error("server error {status}: {}", .message.as_deref().unwrap_or(GENERIC_FAILURE_MESSAGE))]
    Server { status: u16, message: Option<String> },
}

impl FetchError {
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        FetchError::Server {
            status,
            message: Some(message.into()),
        }
    }

    /// Text suitable for a user-facing notification.
    pub fn user_message(&self) -> &str {
        match self {
            FetchError::Network(_) => "Unable to reach the server. Check your connection and retry.",
            FetchError::Server {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.as_str(),
            FetchError::Server { .. } => GENERIC_FAILURE_MESSAGE,
        }
    }

    /// Whether retrying the same request can reasonably succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Network(_) => true,
            FetchError::Server { status, .. } => *status >= 500,
        }
    }
}

/// Client-side input rejected before submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
