//! Error types for the partner API client.
//!
//! # Design
//! One uniform error type covers the whole call path. `Transport` carries an
//! optional HTTP status: `None` means the request never completed (connect
//! failure, broken stream), `Some` means the server answered with a
//! non-success status. Callers that only want a message can rely on
//! `Display`; nothing beyond the message is guaranteed.

use std::fmt;

/// Errors returned by `PartnerApiClient` and `ClientConfig`.
#[derive(Debug)]
pub enum ApiError {
    /// Construction-time validation failed (empty url, login, or password).
    Configuration(String),

    /// The HTTP round trip failed: either the transport itself (`status:
    /// None`) or the server replied with a non-success status (`status:
    /// Some`). The message has been normalized from the upstream legacy
    /// codepage where necessary.
    Transport { status: Option<u16>, message: String },

    /// JSON decoding was requested and the BOM-stripped response body was
    /// not valid JSON.
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Configuration(msg) => {
                write!(f, "invalid configuration: {msg}")
            }
            ApiError::Transport { status: Some(status), message } => {
                write!(f, "HTTP {status}: {message}")
            }
            ApiError::Transport { status: None, message } => {
                write!(f, "transport failed: {message}")
            }
            ApiError::Decode(msg) => {
                write!(f, "response is not valid JSON: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
