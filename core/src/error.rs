//! Error types for the posts API client.
//!
//! # Design
//! Callers see exactly two kinds of failure: an identifier that never left the
//! process (`ApiError::InvalidId`) and whatever the transport reported
//! (`ApiError::Transport`). The client does not retry or reinterpret
//! transport failures; they are passed through as-is.
//!
//! `NotFound` gets a dedicated transport variant because callers frequently
//! distinguish "the post does not exist" from "the server returned an
//! unexpected status." All other non-2xx responses land in `Http` with the
//! raw status code and body for debugging.

use std::fmt;

use thiserror::Error;

/// Result type for `PostsClient` operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Why an identifier was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidIdReason {
    NotAPositiveInteger,
    PathTraversal,
}

impl fmt::Display for InvalidIdReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidIdReason::NotAPositiveInteger => f.write_str("not a positive integer"),
            InvalidIdReason::PathTraversal => f.write_str("path traversal characters"),
        }
    }
}

/// An identifier failed validation. Raised before any request is issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid id: {reason}, got {received}")]
pub struct InvalidIdError {
    pub reason: InvalidIdReason,
    /// Textual form of the value the caller supplied.
    pub received: String,
}

impl InvalidIdError {
    pub fn new(reason: InvalidIdReason, received: impl Into<String>) -> Self {
        Self {
            reason,
            received: received.into(),
        }
    }
}

/// Failures reported by a [`Transport`](crate::http::Transport).
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("request timed out")]
    Timeout,

    /// The request never produced a response (connect, DNS, TLS...).
    #[error("network error: {0}")]
    Network(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

/// Errors returned by `PostsClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    InvalidId(#[from] InvalidIdError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ApiError {
    /// Returns true if the identifier was rejected before any I/O.
    pub fn is_invalid_id(&self) -> bool {
        matches!(self, ApiError::InvalidId(_))
    }

    /// Returns true if the server reported the post as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Transport(TransportError::NotFound))
    }
}
