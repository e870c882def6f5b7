//! Error types for ledger clients

use thiserror::Error;

/// Result type for ledger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Ledger client errors
#[derive(Error, Debug)]
pub enum Error {
    /// Node connection failure (dial, drop, timeout)
    #[error("connection error: {0}")]
    Connection(String),

    /// Event subscription could not be established
    #[error("subscribe error: {0}")]
    Subscribe(String),

    /// Log filtering over a block range failed
    #[error("filter error: {0}")]
    Filter(String),

    /// A contract call was rejected or could not be sent
    #[error("contract call error: {0}")]
    ContractCall(String),

    /// Malformed on-chain data
    #[error("decode error: {0}")]
    Decode(String),
}
