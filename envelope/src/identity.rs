//! Static participant identity
//!
//! Each participant owns one long-lived key pair derived from a single
//! 32-byte seed: an Ed25519 signing key and an X25519 encryption key.
//! The same seed yields the same identity, so the operator's existing
//! chain private key doubles as the decryption key for inbound envelopes.

use crate::sealed::{SealedEnvelope, KEY_LEN, SCHEME_VERSION};
use crate::{Error, Result};
use crypto_box::{
    aead::{Aead, AeadCore, OsRng},
    PublicKey, SalsaBox, SecretKey,
};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};

/// Long-lived signing + encryption identity
pub struct Identity {
    signing_key: SigningKey,
    encryption_key: SecretKey,
}

impl Identity {
    /// Derive the identity from a 32-byte seed
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
            encryption_key: SecretKey::from(*seed),
        }
    }

    /// Derive the identity from a hex-encoded private key, `0x` prefix optional
    pub fn from_hex(private_key: &str) -> Result<Self> {
        let trimmed = private_key.strip_prefix("0x").unwrap_or(private_key);
        let raw = hex::decode(trimmed).map_err(|e| Error::Key(format!("hex: {}", e)))?;
        let seed: [u8; 32] = raw
            .try_into()
            .map_err(|v: Vec<u8>| Error::Key(format!("private key is {} bytes, want 32", v.len())))?;
        Ok(Self::from_seed(&seed))
    }

    /// Generate a new random identity
    pub fn generate() -> Self {
        Self::from_seed(&rand::random::<[u8; 32]>())
    }

    /// X25519 public encryption key, handed to counterparties
    pub fn public_encryption_key(&self) -> [u8; 32] {
        *self.encryption_key.public_key().as_bytes()
    }

    /// Ed25519 verification key for the signing half
    pub fn verifying_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// Sign a message with the identity's Ed25519 key
    pub fn sign(&self, message: &[u8]) -> Signature {
        self.signing_key.sign(message)
    }

    /// Verify a signature made by this identity
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<()> {
        self.signing_key
            .verifying_key()
            .verify(message, signature)
            .map_err(|_| Error::Authentication)
    }

    /// Seal `message` for the holder of `recipient_public_key`
    ///
    /// Generates a fresh ephemeral key pair and a fresh 24-byte nonce per
    /// call; the static key plays no part in sealing, only the recipient can
    /// open the result.
    pub fn encrypt(&self, message: &[u8], recipient_public_key: &[u8; KEY_LEN]) -> Result<SealedEnvelope> {
        let ephemeral_secret = SecretKey::generate(&mut OsRng);
        let ephemeral_public = ephemeral_secret.public_key();
        let nonce = SalsaBox::generate_nonce(&mut OsRng);

        let sealer = SalsaBox::new(&PublicKey::from(*recipient_public_key), &ephemeral_secret);
        let ciphertext = sealer.encrypt(&nonce, message).map_err(|_| Error::Encryption)?;

        Ok(SealedEnvelope {
            version: SCHEME_VERSION.to_string(),
            nonce: nonce.into(),
            ephemeral_public_key: *ephemeral_public.as_bytes(),
            ciphertext,
        })
    }

    /// Open an envelope sealed against our public encryption key
    ///
    /// Tampered or wrong-key ciphertext fails with [`Error::Authentication`];
    /// no partial plaintext is ever returned.
    pub fn decrypt(&self, envelope: &SealedEnvelope) -> Result<Vec<u8>> {
        let opener = SalsaBox::new(
            &PublicKey::from(envelope.ephemeral_public_key),
            &self.encryption_key,
        );
        opener
            .decrypt(&envelope.nonce.into(), envelope.ciphertext.as_slice())
            .map_err(|_| Error::Authentication)
    }
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material
        f.debug_struct("Identity")
            .field("public_encryption_key", &hex::encode(self.public_encryption_key()))
            .finish()
    }
}
