//! Error types for the widget.
//!
//! Only two conditions are fatal: a missing collection identifier and a
//! missing render target. Everything else resolves to a default or to a
//! fallback fragment inside the widget's own container.

use thiserror::Error;

/// Result type for configuration resolution
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Fatal configuration errors. Bootstrap aborts before touching the page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The embed tag carries no (or a blank) `data-slug`
    #[error("data-slug is missing")]
    MissingCollectionId,

    /// The page has no element to render into
    #[error("widget container #{id} not found")]
    MissingRenderTarget {
        /// Element id the widget looked for
        id: String,
    },
}

/// Why a testimonial fetch ended in the "load failed" outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// Network or transport failure before a response arrived
    #[error("transport error: {message}")]
    Transport {
        /// Error message
        message: String,
    },

    /// No response within the configured bound
    #[error("request timed out after {ms}ms")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
    },

    /// The server answered with a non-success status
    #[error("fetch failed with status {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// The body was not a JSON array of records
    #[error("invalid response body: {message}")]
    Decode {
        /// Error message
        message: String,
    },
}

impl LoadError {
    /// Create a transport error
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a decode error
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(err.to_string())
    }
}
