//! Error types for wiki API operations.

use std::num::ParseIntError;

/// Error from wiki API operations.
#[derive(Debug, thiserror::Error)]
pub enum WikiError {
    /// HTTP request failed before a response was received (DNS, TCP, TLS, I/O).
    #[error(transparent)]
    Transport(#[from] ureq::Error),

    /// Server responded with a status outside 2xx.
    #[error("request failed: {status} {body}")]
    RequestFailed {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// Response body is not the expected JSON.
    #[error("JSON decode error")]
    Decode(#[from] serde_json::Error),

    /// Child page ID is not an integer.
    #[error("invalid page ID {id:?}")]
    Conversion {
        /// ID as sent by the server.
        id: String,
        /// Parse failure.
        source: ParseIntError,
    },

    /// Deadline passed before the request was sent.
    #[error("deadline exceeded")]
    DeadlineExceeded,
}

/// Category of a [`WikiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Server was never reached, or the connection broke.
    Transport,
    /// Server was reached and rejected the request.
    RequestFailed,
    /// Response JSON did not match the expected shape.
    Decode,
    /// Numeric conversion of an ID failed.
    Conversion,
    /// Caller deadline elapsed.
    Deadline,
}

impl WikiError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) => ErrorKind::Transport,
            Self::RequestFailed { .. } => ErrorKind::RequestFailed,
            Self::Decode(_) => ErrorKind::Decode,
            Self::Conversion { .. } => ErrorKind::Conversion,
            Self::DeadlineExceeded => ErrorKind::Deadline,
        }
    }

    /// HTTP status code, if the server responded.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}
