//! Failures reported by the remote trip backend.

use thiserror::Error;

/// Errors from [`crate::PriceEstimator`] and [`crate::TripGateway`]
/// implementations.
///
/// Calls are never retried. The draft that produced the request is left as
/// it was so the caller can correct it and try again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The request timed out.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The backend answered with a non-success status.
    ///
    /// `message` carries the backend's own explanation when it sent one.
    #[error("{url} returned HTTP {status}: {message}")]
    Http {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Backend message or status text.
        message: String,
    },
    /// The request never reached the backend.
    #[error("network error calling {url}: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse backend response: {message}")]
    Parse {
        /// Decoder error description.
        message: String,
    },
}
