use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while talking to the chat service.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// HTTP transport failed (connection refused, reset, DNS).
    #[error("HTTP error: {0}")]
    Http(String),

    /// Request did not complete before the client deadline.
    #[error("chat request timed out after {0:?}")]
    Timeout(Duration),

    /// Chat service answered with a non-2xx status.
    #[error("chat API error: HTTP {status}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        body: String,
    },

    /// Reply could not be parsed or had no content.
    #[error("failed to parse chat response: {0}")]
    Parse(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl AssistantError {
    pub(crate) fn from_transport(err: &reqwest::Error, deadline: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(deadline)
        } else if err.is_decode() {
            Self::Parse(err.to_string())
        } else {
            Self::Http(err.to_string())
        }
    }
}
