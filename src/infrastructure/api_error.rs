//! API error taxonomy and message normalization.
//!
//! The `Display` rendering of each variant is the exact human-readable
//! string the facade stores in the catalog error state, so normalization
//! lives here rather than at every call site.

use thiserror::Error;

/// Failures surfaced by the product gateway.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout).
    #[error("Network error: No response received from server")]
    Network,

    /// The server answered with a non-2xx status. `message` is the body's
    /// `message` field when one was present, otherwise the status fallback.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// A single-product lookup came back 404.
    #[error("Product not found: {id}")]
    NotFound { id: String },

    /// The request could not be built, or its body could not be decoded.
    #[error("Request error: {0}")]
    Request(String),
}

impl ApiError {
    /// Build a `Server` error from a status code and the optional `message`
    /// field of the response body.
    pub fn from_status(status: reqwest::StatusCode, body_message: Option<String>) -> Self {
        let message = body_message.unwrap_or_else(|| {
            format!(
                "Error {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )
        });
        Self::Server {
            status: status.as_u16(),
            message,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
