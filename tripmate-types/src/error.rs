//! Error types for all tripmate crates.

use std::time::Duration;

/// Errors from the chat and itinerary functions.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// The function answered with a non-success status.
    ///
    /// `message` is the `error` field of the response envelope when present,
    /// otherwise a generic fallback. It is displayed verbatim.
    #[error("{message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Human-readable failure message.
        message: String,
    },
    /// Network-level error (connection refused, reset, DNS failure).
    #[error("network error: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// Request timed out.
    #[error("timeout after {0:?}")]
    Timeout(Duration),
    /// The response body failed while it was being streamed.
    #[error("stream read error: {0}")]
    Stream(String),
    /// A success response carried a body that could not be understood.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    /// Client configuration is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ChatError {
    /// Whether this error is likely transient.
    ///
    /// Nothing in tripmate retries on its own; this is for callers that do.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout(_) | Self::Stream(_) => true,
            Self::Api { status, .. } => *status == 429 || (500..=599).contains(status),
            Self::InvalidResponse(_) | Self::Config(_) => false,
        }
    }
}
