//! Error types for the envelope codec

use thiserror::Error;

/// Result type for envelope operations
pub type Result<T> = std::result::Result<T, Error>;

/// Envelope codec errors
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed wire data (JSON, base64 or byte lengths)
    #[error("decode failure: {0}")]
    Decode(String),

    /// Ciphertext authentication tag did not verify
    #[error("authentication failure")]
    Authentication,

    /// Sealing failed
    #[error("encryption failure")]
    Encryption,

    /// Malformed key material
    #[error("invalid key: {0}")]
    Key(String),
}
