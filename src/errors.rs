//! Error types and handling for the Vault SDK
//!
//! This module defines the error types that can be returned by SDK operations.
//! Failures from the server are mapped into a small taxonomy so callers can
//! branch without parsing status codes by hand:
//!
//! - **Http**: any non-2xx response not covered by a more specific variant,
//!   carrying the status code and the server's `errors` list
//! - **NotFound**: a read of a path with no value behind it (404)
//! - **Precondition**: a check-and-set mismatch on a versioned write (400)
//! - **PermissionDenied**: the token lacks capability on the path (403)
//! - **Network / Timeout**: connection-level failures owned by the transport
//!
//! # Example
//!
//! ```no_run
//! # use vault_sdk::{Client, Error};
//! # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
//! match client.kv2().read_secret("app/config").await {
//!     Ok(secret) => println!("version {}", secret.metadata.version),
//!     Err(Error::NotFound { .. }) => println!("no secret at that path"),
//!     Err(Error::PermissionDenied { .. }) => println!("token lacks access"),
//!     Err(e) => return Err(e.into()),
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

/// Result type alias for the SDK
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the SDK
#[derive(Error, Debug)]
pub enum Error {
    /// Non-2xx HTTP response from the API
    #[error("http {status}: {} (req={request_id:?})", .errors.join("; "))]
    Http {
        /// HTTP status code
        status: u16,
        /// Error strings from the server's `errors` list
        errors: Vec<String>,
        /// Request ID, when the server supplied one
        request_id: Option<String>,
    },

    /// No value at the requested path (404)
    #[error("not found: {path}")]
    NotFound {
        /// API path of the failed read
        path: String,
    },

    /// Check-and-set precondition rejected by the store (400)
    ///
    /// Raised when a versioned write carries a `cas` value that no longer
    /// matches the current version. The SDK never retries these.
    #[error("check-and-set mismatch at {path}: {message}")]
    Precondition {
        /// API path of the failed write
        path: String,
        /// Server-provided description of the mismatch
        message: String,
    },

    /// Token lacks capability on the path (403)
    #[error("permission denied: {path}")]
    PermissionDenied {
        /// API path of the denied request
        path: String,
    },

    /// Deserialization error
    #[error("deserialize: {0}")]
    Deserialize(String),

    /// Network error
    #[error("network: {0}")]
    Network(String),

    /// Request timeout
    #[error("timeout")]
    Timeout,

    /// Configuration error
    #[error("config: {0}")]
    Config(String),

    /// Other errors
    #[error("other: {0}")]
    Other(String),
}

/// Coarse error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Non-2xx response without a dedicated variant
    Protocol,
    /// Path has no current value (404)
    NotFound,
    /// Check-and-set mismatch (400)
    Precondition,
    /// Token lacks capability (403)
    PermissionDenied,
    /// Connection-level failure
    Network,
    /// Request deadline exceeded
    Timeout,
    /// Invalid client configuration
    Config,
    /// Other/unknown error
    Other,
}

impl Error {
    /// Get the error kind for categorization
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Http { .. } => ErrorKind::Protocol,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::Precondition { .. } => ErrorKind::Precondition,
            Error::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            Error::Network(_) => ErrorKind::Network,
            Error::Timeout => ErrorKind::Timeout,
            Error::Config(_) => ErrorKind::Config,
            _ => ErrorKind::Other,
        }
    }

    /// Check if the error is transient and safe to retry
    ///
    /// Check-and-set mismatches and not-found reads are never retryable;
    /// surfacing them unchanged is part of the API contract.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http { status, .. } => matches!(status, 408 | 429 | 500 | 502 | 503 | 504),
            Error::Network(_) => true,
            Error::Timeout => true,
            _ => false,
        }
    }

    /// Get the HTTP status code if this error came from a response
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            Error::NotFound { .. } => Some(404),
            Error::Precondition { .. } => Some(400),
            Error::PermissionDenied { .. } => Some(403),
            _ => None,
        }
    }

    /// Map a non-2xx response onto the taxonomy
    ///
    /// Vault signals a check-and-set failure as a plain 400 whose error text
    /// names the parameter, so that one case is detected by content.
    pub(crate) fn from_status(
        status: u16,
        path: &str,
        errors: Vec<String>,
        request_id: Option<String>,
    ) -> Self {
        match status {
            404 => Error::NotFound {
                path: path.to_string(),
            },
            403 => Error::PermissionDenied {
                path: path.to_string(),
            },
            400 if errors.iter().any(|e| e.contains("check-and-set")) => Error::Precondition {
                path: path.to_string(),
                message: errors.join("; "),
            },
            _ => Error::Http {
                status,
                errors,
                request_id,
            },
        }
    }
}

/// Server error response structure (`{"errors": ["..."]}`)
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub errors: Vec<String>,
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout
        } else if err.is_connect() || err.is_request() {
            Error::Network(err.to_string())
        } else if err.is_decode() {
            Error::Deserialize(err.to_string())
        } else {
            Error::Other(err.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Deserialize(err.to_string())
    }
}
