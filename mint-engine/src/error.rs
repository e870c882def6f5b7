//! Error types for the correlation engine

use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Engine errors
#[derive(Error, Debug)]
pub enum Error {
    /// Envelope codec failure (malformed wire data or bad auth tag)
    #[error("envelope error: {0}")]
    Envelope(#[from] envelope::Error),

    /// Decrypted payload could not be interpreted
    #[error("payload decode failure: {0}")]
    Payload(String),

    /// AuthGranted arrived with no matching correlation record
    ///
    /// Indicates a missing or duplicated MintRequest, or a restart that
    /// lost in-memory state.
    #[error("no ongoing request for request id {request_id}")]
    UnknownRequest {
        /// Correlation key, lowercase hex
        request_id: String,
    },

    /// Bank collaborator failure
    #[error("bank error: {0}")]
    Bank(#[from] bank_api::Error),

    /// Ledger collaborator failure
    #[error("ledger error: {0}")]
    Chain(#[from] chain_events::Error),

    /// Amount conversion failure (overflow or malformed input)
    #[error("amount conversion error: {0}")]
    Amount(String),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
