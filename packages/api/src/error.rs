//! Client-perceived error taxonomy for backend calls.
//!
//! The session manager's whole failure policy hangs on one distinction:
//! a confirmed **401** means the credentials are invalid and the session must
//! be destroyed; everything else (timeout, 5xx, network unreachable) is
//! recoverable and must leave the session untouched.

use thiserror::Error;

/// Errors surfaced by [`crate::ApiClient`] operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// HTTP 401. The only variant that may destroy a session.
    #[error("not authorized")]
    Unauthorized,

    /// Network unreachable, timeout, or a 5xx from the backend.
    #[error("transient failure: {0}")]
    Transient(String),

    /// A non-401 client error status (4xx) with the backend's message.
    #[error("request failed with status {code}: {message}")]
    Status { code: u16, message: String },

    /// The response body did not parse into the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// Whether retrying the same call later could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, ApiError::Transient(_))
    }

    /// A short message suitable for inline display next to a form or card.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized => "Your session has expired, please sign in again".to_string(),
            ApiError::Transient(_) => {
                "The server could not be reached, please try again later".to_string()
            }
            ApiError::Status { message, .. } if !message.is_empty() => message.clone(),
            ApiError::Status { code, .. } => format!("Request failed ({code})"),
            ApiError::Decode(_) => "Unexpected response from the server".to_string(),
        }
    }
}
