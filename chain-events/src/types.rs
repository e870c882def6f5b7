//! Decoded ledger event types and the correlation key

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 32-byte correlation key, originated on the ledger side
///
/// Immutable once assigned; rendered as lowercase hex wherever a string key
/// is needed (map keys, bank request identifiers, log fields).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub [u8; 32]);

impl RequestId {
    /// Lowercase hex rendering, no prefix
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from a hex string, `0x` prefix optional
    pub fn from_hex(s: &str) -> Result<Self> {
        let trimmed = s.strip_prefix("0x").unwrap_or(s);
        let raw = hex::decode(trimmed).map_err(|e| Error::Decode(format!("request id hex: {}", e)))?;
        let bytes: [u8; 32] = raw
            .try_into()
            .map_err(|v: Vec<u8>| Error::Decode(format!("request id is {} bytes, want 32", v.len())))?;
        Ok(Self(bytes))
    }

    /// Raw bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// A decoded `MintRequest` event: a payer asks to mint against a bank payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MintRequestEvent {
    /// Correlation key for the whole workflow
    pub request_id: RequestId,

    /// Requested amount in smallest-unit tokens (18 decimals)
    pub amount: u128,

    /// Sealed envelope JSON carrying the payer's bank details
    pub encrypted_data: Vec<u8>,

    /// Block the event was emitted in
    pub block_number: u64,
}

/// A decoded `AuthGranted` event: the payer approved the bank consent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthGrantedEvent {
    /// Correlation key for the whole workflow
    pub request_id: RequestId,

    /// Sealed envelope JSON carrying the consent authorization code
    pub grant_encrypted_data: Vec<u8>,

    /// Block the event was emitted in
    pub block_number: u64,
}

/// Handle to a submitted ledger transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxHandle {
    /// Transaction hash, hex
    pub hash: String,
}
