//! Error types for the Galleria image client.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur when talking to the image service.
///
/// The non-`try_` client methods collapse every variant into the same
/// fallback path; the variants only matter to callers of the `try_` methods.
#[derive(Debug, Error)]
pub enum Error {
    /// Connection error (network failure, DNS resolution, refused or reset).
    #[error("connection error: {0}")]
    Connection(String),

    /// The request did not complete before the client deadline.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
    },

    /// Response body was not valid JSON of the expected shape.
    #[error("failed to deserialize response: {0}")]
    Deserialization(String),

    /// Client configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Classify a transport error from reqwest.
    pub(crate) fn from_transport(err: &reqwest::Error, deadline: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(deadline)
        } else if err.is_decode() {
            Self::Deserialization(err.to_string())
        } else {
            Self::Connection(err.to_string())
        }
    }

    /// Returns `true` if this is a connection error.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns `true` if the client deadline elapsed.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// Returns the HTTP status if the server answered with an error status.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
