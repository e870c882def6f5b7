//! Request and response types for the payment authorization flow

use serde::{Deserialize, Serialize};

/// Bank account details of a payer or beneficiary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountDetails {
    /// Six-digit sort code
    pub sort_code: String,

    /// Account number
    pub account_number: String,

    /// Account holder name
    pub name: String,
}

/// OAuth2 access token for payment-initiation scopes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    /// Bearer token value
    pub token: String,

    /// Lifetime in seconds from issuance
    pub expires_in: u64,
}

/// Payment authorization request assembled from a mint request
///
/// The same values must be replayed verbatim on submission; banks reject a
/// submission that differs from its consent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentAuthRequest {
    /// Correlation key, lowercase hex
    pub request_id: String,

    /// Payer's bank institution identifier
    pub institution_id: String,

    /// Amount as a decimal string (e.g. `"1.2"`)
    pub amount: String,

    /// Payer account details
    pub payer: AccountDetails,
}

/// A pending consent created at the bank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsentResponse {
    /// Correlation key, lowercase hex
    pub request_id: String,

    /// URL the payer visits to authorize the payment
    pub url: String,

    /// Bank-side consent identifier
    pub consent_id: String,
}

/// Payer approval of a consent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentGrant {
    /// Correlation key, lowercase hex
    pub request_id: String,

    /// Consent this grant refers to
    pub consent_id: String,

    /// One-time authorization code returned by the consent flow
    pub consent_code: String,
}

/// A payment accepted by the bank, awaiting settlement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitPaymentResponse {
    /// Correlation key, lowercase hex
    pub request_id: String,

    /// Token exchanged for the consent code, used for status inquiries
    pub consent_token: String,

    /// Bank-side payment identifier
    pub payment_id: String,
}

/// Outcome of a payment status inquiry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentStatusResponse {
    /// Correlation key, lowercase hex
    pub request_id: String,

    /// Bank-side payment identifier
    pub payment_id: String,

    /// Raw provider status string
    pub status: String,

    /// Whether funds have irrevocably transferred
    pub settled: bool,
}
