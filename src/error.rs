//! Failure shapes produced by the HTTP pipeline and their classification.
//!
//! DESIGN
//! ======
//! `ApiError` records what was observable about a failed exchange: a response
//! status, a transport signal, or a local failure before/after the wire.
//! `ErrorKind` is derived from that shape alone, so the same failure always
//! classifies the same way.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use std::fmt;

use serde_json::Value;

/// Transport-level signal attached to a failure that never got a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportCode {
    /// The request was aborted after exceeding the timeout ceiling.
    Aborted,
    /// The HTTP stack reported its own timeout.
    TimedOut,
    /// No connection could be established.
    Connect,
}

/// A failed exchange as seen by the caller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The backend answered with a non-success status.
    #[error("request failed with status code {status}")]
    Status { status: u16, body: Value },

    /// The request was sent but no response arrived.
    #[error("{message}")]
    Transport { code: Option<TransportCode>, message: String },

    /// The request could not be built or sent.
    #[error("{message}")]
    Request { message: String },

    /// A success response did not match the expected payload shape.
    #[error("unexpected response payload: {message}")]
    Decode { message: String },
}

/// Closed classification over failed exchanges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Unauthorized,
    Timeout,
    Network,
    ServerError,
    ClientError,
    Unknown,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Unauthorized => "unauthorized",
            Self::Timeout => "timeout",
            Self::Network => "network",
            Self::ServerError => "server_error",
            Self::ClientError => "client_error",
            Self::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

impl ApiError {
    /// Classify this failure. Priority: 401, timeout, status class, network, unknown.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Status { status: 401, .. } => ErrorKind::Unauthorized,
            _ if self.is_timeout() => ErrorKind::Timeout,
            Self::Status { status, .. } if *status >= 500 => ErrorKind::ServerError,
            Self::Status { .. } => ErrorKind::ClientError,
            Self::Transport { .. } => ErrorKind::Network,
            Self::Request { .. } | Self::Decode { .. } => ErrorKind::Unknown,
        }
    }

    /// HTTP status, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Response body, if a response was received.
    pub fn body(&self) -> Option<&Value> {
        match self {
            Self::Status { body, .. } => Some(body),
            _ => None,
        }
    }

    fn is_timeout(&self) -> bool {
        match self {
            Self::Transport {
                code: Some(TransportCode::Aborted | TransportCode::TimedOut),
                ..
            } => true,
            Self::Transport { message, .. } | Self::Request { message } => mentions_timeout(message),
            Self::Status { .. } | Self::Decode { .. } => false,
        }
    }
}

fn mentions_timeout(message: &str) -> bool {
    message.to_ascii_lowercase().contains("timeout")
}
