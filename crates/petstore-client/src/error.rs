use std::fmt;

use thiserror::Error;

/// Result alias for client calls
pub type ClientResult<T> = Result<T, ClientError>;

/// Logical operation a request belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `POST /pet`
    Create,
    /// `GET /pet/{id}`
    Fetch,
    /// `PUT /pet`
    Replace,
    /// `DELETE /pet/{id}`
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Create => "create",
            Operation::Fetch => "fetch",
            Operation::Replace => "replace",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Error types for the pet store client
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (connect, timeout, body read)
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered a mutating call with a status it should not have
    #[error("{operation} returned unexpected status {status}: {body}")]
    UnexpectedStatus {
        /// Operation that was attempted
        operation: Operation,
        /// Status code received
        status: u16,
        /// Response body
        body: String,
    },

    /// The configured base address is unusable
    #[error("Invalid base URL '{0}'")]
    InvalidBaseUrl(String),
}

impl ClientError {
    /// Status code carried by an [`ClientError::UnexpectedStatus`].
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::UnexpectedStatus { status, .. } => Some(*status),
            ClientError::Http(err) => err.status().map(|s| s.as_u16()),
            ClientError::InvalidBaseUrl(_) => None,
        }
    }
}
