//! Error types for bank API clients

use thiserror::Error;

/// Result type for bank API operations
pub type Result<T> = std::result::Result<T, Error>;

/// Bank API errors
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level failure (connection, timeout)
    #[error("transport error: {0}")]
    Transport(String),

    /// The API returned an unexpected status
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// The response body could not be interpreted
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Client credentials were rejected
    #[error("authorization failed: {0}")]
    Authorization(String),
}
