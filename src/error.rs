//! Error types and error handling for the console client
//!
//! `ApiError` describes everything that can go wrong while talking to the
//! backend. Operations never hand it to callers directly: they collapse it
//! into a `Rejection`, which only distinguishes "the server told us why"
//! from "something went wrong".

use crate::storage::StorageError;
use thiserror::Error;

/// Message shown when a failure carries no server-provided explanation
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Errors raised by the API client
#[derive(Error, Debug)]
pub enum ApiError {
    /// Backend answered with a non-success status
    #[error("Request failed with status {status}: {}", message.as_deref().unwrap_or("no message"))]
    Status {
        /// HTTP status code
        status: u16,
        /// `message` field of the error payload, if the server sent one
        message: Option<String>,
    },

    /// Request never produced a response (connection refused, DNS, ...)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body was not the JSON we expected
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Session could not be read from durable storage
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Local file needed for an upload could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// HTTP status of the failure, when there was a response at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failure value returned by every console operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Request failed and the server explained why
    #[error("{0}")]
    Server(String),
    /// Request failed without a usable explanation
    #[error("{}", GENERIC_FAILURE_MESSAGE)]
    Generic,
}

impl Rejection {
    /// Reason string stored in the slice and shown to the user
    pub fn reason(&self) -> String {
        self.to_string()
    }
}

impl From<&ApiError> for Rejection {
    fn from(err: &ApiError) -> Self {
        match err {
            ApiError::Status {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Rejection::Server(message.clone()),
            _ => Rejection::Generic,
        }
    }
}

impl From<ApiError> for Rejection {
    fn from(err: ApiError) -> Self {
        Rejection::from(&err)
    }
}

impl From<StorageError> for Rejection {
    fn from(_: StorageError) -> Self {
        Rejection::Generic
    }
}

/// Result of a console operation
pub type Outcome<T> = Result<T, Rejection>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_becomes_server_rejection() {
        let err = ApiError::Status {
            status: 400,
            message: Some("Email already registered".to_string()),
        };
        let rejection = Rejection::from(&err);
        assert_eq!(
            rejection,
            Rejection::Server("Email already registered".to_string())
        );
        assert_eq!(rejection.reason(), "Email already registered");
    }

    #[test]
    fn test_missing_message_becomes_generic() {
        let err = ApiError::Status {
            status: 500,
            message: None,
        };
        assert_eq!(Rejection::from(err), Rejection::Generic);
        assert_eq!(Rejection::Generic.reason(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_blank_message_becomes_generic() {
        let err = ApiError::Status {
            status: 422,
            message: Some("   ".to_string()),
        };
        assert_eq!(Rejection::from(err), Rejection::Generic);
    }

    #[test]
    fn test_decode_error_becomes_generic() {
        let decode = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = ApiError::from(decode);
        assert_eq!(err.status(), None);
        assert_eq!(Rejection::from(err), Rejection::Generic);
    }

    #[test]
    fn test_status_error_display() {
        let err = ApiError::Status {
            status: 404,
            message: None,
        };
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("404"));
    }
}
