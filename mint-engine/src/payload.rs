//! Plaintext payloads exchanged inside sealed envelopes
//!
//! Field names are lowercase-camel on the wire; the counterpart that seals
//! and opens these payloads is an independently deployed program.

use crate::amount::{to_decimal, DECIMAL_DIGITS};
use crate::{Error, Result};
use bank_api::{AccountDetails, PaymentAuthRequest};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chain_events::MintRequestEvent;
use serde::{Deserialize, Serialize};

/// Payer bank details carried inside a `MintRequest` event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintRequestPayload {
    /// Payer's bank institution identifier
    pub institution_id: String,

    /// Payer sort code
    pub sort_code: String,

    /// Payer account number
    pub account_number: String,

    /// Payer name
    pub name: String,

    /// Payer's long-term public encryption key, base64
    pub public_key: String,
}

/// Consent details sent back to the payer via the `AuthRequest` contract call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthRequestPayload {
    /// URL the payer visits to authorize the payment
    pub url: String,

    /// Bank-side consent identifier
    pub consent_id: String,
}

/// Consent approval carried inside an `AuthGranted` event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthGrantedPayload {
    /// One-time consent authorization code
    pub consent_code: String,

    /// Payer's public encryption key, base64 (repeated, the channel is stateless)
    pub public_key: String,
}

/// Build the bank consent request for a mint request
///
/// Converts the ledger amount to the bank's decimal-string representation.
pub fn payment_auth_request(
    event: &MintRequestEvent,
    payload: &MintRequestPayload,
) -> Result<PaymentAuthRequest> {
    Ok(PaymentAuthRequest {
        request_id: event.request_id.to_hex(),
        institution_id: payload.institution_id.clone(),
        amount: to_decimal(event.amount, DECIMAL_DIGITS)?,
        payer: AccountDetails {
            sort_code: payload.sort_code.clone(),
            account_number: payload.account_number.clone(),
            name: payload.name.clone(),
        },
    })
}

/// Decode a counterparty public encryption key from its base64 payload form
pub fn decode_public_key(encoded: &str) -> Result<[u8; 32]> {
    let raw = BASE64
        .decode(encoded)
        .map_err(|e| Error::Payload(format!("public key base64: {}", e)))?;
    raw.try_into()
        .map_err(|v: Vec<u8>| Error::Payload(format!("public key is {} bytes, want 32", v.len())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chain_events::RequestId;

    fn mint_event(amount: u128) -> MintRequestEvent {
        MintRequestEvent {
            request_id: RequestId([1u8; 32]),
            amount,
            encrypted_data: vec![],
            block_number: 10,
        }
    }

    fn mint_payload() -> MintRequestPayload {
        MintRequestPayload {
            institution_id: "monzo".to_string(),
            sort_code: "040004".to_string(),
            account_number: "12345678".to_string(),
            name: "A. Payer".to_string(),
            public_key: BASE64.encode([3u8; 32]),
        }
    }

    #[test]
    fn test_payment_auth_request_converts_amount() {
        let request = payment_auth_request(&mint_event(1_000_000_000_000_000_000), &mint_payload()).unwrap();

        assert_eq!(request.amount, "1");
        assert_eq!(request.request_id, RequestId([1u8; 32]).to_hex());
        assert_eq!(request.payer.sort_code, "040004");
        assert_eq!(request.payer.account_number, "12345678");
        assert_eq!(request.payer.name, "A. Payer");
        assert_eq!(request.institution_id, "monzo");
    }

    #[test]
    fn test_payload_wire_names() {
        let json = serde_json::to_value(mint_payload()).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("institutionId"));
        assert!(obj.contains_key("sortCode"));
        assert!(obj.contains_key("accountNumber"));
        assert!(obj.contains_key("name"));
        assert!(obj.contains_key("publicKey"));

        let json = serde_json::to_value(AuthRequestPayload {
            url: "https://bank.example/authorize".to_string(),
            consent_id: "consent-1".to_string(),
        })
        .unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("url"));
        assert!(obj.contains_key("consentId"));

        let json = serde_json::to_value(AuthGrantedPayload {
            consent_code: "code-1".to_string(),
            public_key: BASE64.encode([3u8; 32]),
        })
        .unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("consentCode"));
        assert!(obj.contains_key("publicKey"));
    }

    #[test]
    fn test_decode_public_key_length_check() {
        assert!(decode_public_key(&BASE64.encode([3u8; 32])).is_ok());
        assert!(matches!(decode_public_key("!!!"), Err(Error::Payload(_))));
        assert!(matches!(
            decode_public_key(&BASE64.encode([3u8; 31])),
            Err(Error::Payload(_))
        ));
    }
}
