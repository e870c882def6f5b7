//! MintBridge Envelope Codec
//!
//! Authenticated public-key encryption for small JSON payloads travelling
//! over the public ledger.
//!
//! # Architecture
//!
//! - **NaCl box**: X25519 key agreement + XSalsa20-Poly1305 sealing
//! - **Ephemeral sender keys**: fresh key pair and nonce per message
//! - **Fixed wire format**: base64 JSON consumed by an independently
//!   deployed counterpart, so field names and byte lengths are a contract
//!
//! # Invariants
//!
//! - A nonce is never reused under the same key pair
//! - A failed authentication tag never yields plaintext
//! - Decoding rejects nonces ≠ 24 bytes and keys ≠ 32 bytes

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod error;
pub mod identity;
pub mod sealed;

pub use error::{Error, Result};
pub use identity::Identity;
pub use sealed::{SealedEnvelope, SCHEME_VERSION};
