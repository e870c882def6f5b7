//! The sealed envelope wire format
//!
//! The JSON shape is a cross-implementation contract: the encrypting and
//! decrypting parties are independently deployed programs, so field names,
//! base64 encoding and byte lengths must match exactly.

use crate::{Error, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Scheme tag carried in every envelope
pub const SCHEME_VERSION: &str = "x25519-xsalsa20-poly1305";

/// Nonce length in bytes
pub const NONCE_LEN: usize = 24;

/// Public key length in bytes
pub const KEY_LEN: usize = 32;

/// An authenticated, asymmetrically-encrypted envelope
///
/// Produced fresh per message; the ephemeral key and nonce are never reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedEnvelope {
    /// Scheme tag (`x25519-xsalsa20-poly1305`)
    pub version: String,

    /// Random nonce, unique per message
    pub nonce: [u8; NONCE_LEN],

    /// Sender's ephemeral X25519 public key
    pub ephemeral_public_key: [u8; KEY_LEN],

    /// Sealed payload, includes the 16-byte Poly1305 tag
    pub ciphertext: Vec<u8>,
}

/// Base64 intermediate representation, one field per wire key
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireEnvelope {
    version: String,
    nonce: String,
    ephemeral_public_key: String,
    ciphertext: String,
}

impl SealedEnvelope {
    /// Serialize to the wire JSON
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| Error::Decode(e.to_string()))
    }

    /// Parse from the wire JSON, validating byte lengths
    pub fn from_json(data: &[u8]) -> Result<Self> {
        serde_json::from_slice(data).map_err(|e| Error::Decode(e.to_string()))
    }
}

impl Serialize for SealedEnvelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let wire = WireEnvelope {
            version: self.version.clone(),
            nonce: BASE64.encode(self.nonce),
            ephemeral_public_key: BASE64.encode(self.ephemeral_public_key),
            ciphertext: BASE64.encode(&self.ciphertext),
        };
        wire.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SealedEnvelope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        use serde::de::Error as _;

        let wire = WireEnvelope::deserialize(deserializer)?;

        let nonce = BASE64
            .decode(&wire.nonce)
            .map_err(|e| D::Error::custom(format!("nonce base64: {}", e)))?;
        let nonce: [u8; NONCE_LEN] = nonce
            .try_into()
            .map_err(|v: Vec<u8>| D::Error::custom(format!("nonce is {} bytes, want 24", v.len())))?;

        let key = BASE64
            .decode(&wire.ephemeral_public_key)
            .map_err(|e| D::Error::custom(format!("ephemeralPublicKey base64: {}", e)))?;
        let ephemeral_public_key: [u8; KEY_LEN] = key.try_into().map_err(|v: Vec<u8>| {
            D::Error::custom(format!("ephemeralPublicKey is {} bytes, want 32", v.len()))
        })?;

        let ciphertext = BASE64
            .decode(&wire.ciphertext)
            .map_err(|e| D::Error::custom(format!("ciphertext base64: {}", e)))?;

        Ok(SealedEnvelope {
            version: wire.version,
            nonce,
            ephemeral_public_key,
            ciphertext,
        })
    }
}
