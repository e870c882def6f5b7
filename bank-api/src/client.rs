//! The bank collaborator trait

use crate::types::{
    AccessToken, AccountDetails, ConsentResponse, PaymentAuthRequest, PaymentGrant,
    PaymentStatusResponse, SubmitPaymentResponse,
};
use crate::Result;
use async_trait::async_trait;

/// Client for an authorized-payment (open banking) provider
///
/// Implementations may use any identification method (MA-TLS, client
/// credentials) and may cache access tokens per request id. Every call is a
/// plain request/response with a caller-supplied timeout; a transport error
/// or timeout surfaces as an [`Error`](crate::Error), never a panic.
#[async_trait]
pub trait BankClient: Send + Sync {
    /// Obtain an access token scoped for payment initiation
    async fn get_access_token(&self, request_id: &str) -> Result<AccessToken>;

    /// Create a pending payment consent
    ///
    /// The response carries the URL the payer must visit to authorize the
    /// payment, plus the bank's consent identifier.
    async fn create_consent(
        &self,
        request: &PaymentAuthRequest,
        access: &AccessToken,
        beneficiary: &AccountDetails,
    ) -> Result<ConsentResponse>;

    /// Submit an authorized payment
    ///
    /// `request` and `beneficiary` must be identical to the values supplied
    /// when the consent was created.
    async fn submit_payment(
        &self,
        grant: &PaymentGrant,
        request: &PaymentAuthRequest,
        beneficiary: &AccountDetails,
    ) -> Result<SubmitPaymentResponse>;

    /// Query the settlement status of a submitted payment
    async fn get_status(&self, payment: &SubmitPaymentResponse) -> Result<PaymentStatusResponse>;
}
