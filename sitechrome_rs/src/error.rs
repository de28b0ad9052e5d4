//! Error types.
//!
//! None of these ever reach the end user. Load errors are logged at the slot
//! boundary and replaced by fallback markup; config errors fall back to
//! defaults.

use thiserror::Error;

/// Why a fragment could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Http {
        /// Requested URL
        url: String,
        /// Response status
        status: u16,
    },
    /// The request never produced a response.
    #[error("request for {url} failed: {message}")]
    Network {
        /// Requested URL
        url: String,
        /// Host-provided description
        message: String,
    },
    /// A response arrived but its body could not be read as text.
    #[error("malformed response from {url}: {message}")]
    Malformed {
        /// Requested URL
        url: String,
        /// Host-provided description
        message: String,
    },
    /// An inline slot has no compiled-in fragment.
    #[error("no inline fragment for slot {slot}")]
    NoInline {
        /// Slot name
        slot: String,
    },
}

/// Configuration could not be parsed.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid JSON or wrong shape.
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
