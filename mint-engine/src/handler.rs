//! Event handler: the payment-correlation state machine
//!
//! Drives one logical payment through
//! `Requested → AuthPending → AuthGranted → Submitted → Settled` across the
//! ledger and bank collaborators. There is no failed terminal state: an
//! error aborts the step, the caller logs it, and the workflow stalls at its
//! current state until the event source redelivers.

use crate::correlation::{CorrelationRecord, CorrelationStore};
use crate::payload::{
    decode_public_key, payment_auth_request, AuthGrantedPayload, AuthRequestPayload,
    MintRequestPayload,
};
use crate::schedule::{PaymentSchedule, ScheduledPayment};
use crate::{Error, Result};
use async_trait::async_trait;
use bank_api::{AccountDetails, BankClient, PaymentGrant, PaymentStatusResponse};
use chain_events::{AuthGrantedEvent, LedgerClient, MintRequestEvent, RequestId};
use envelope::{Identity, SealedEnvelope};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Methods processing inbound events (ledger events and bank responses)
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Process a `MintRequest` event coming from the payer via the contract
    ///
    /// Creates a pending consent at the bank and calls the contract's
    /// `authRequest` method with the sealed consent details.
    async fn process_mint_request(&self, event: &MintRequestEvent) -> Result<()>;

    /// Process an `AuthGranted` event: the payer authorized the payment
    ///
    /// Submits the payment to the bank and schedules the settlement check.
    async fn process_auth_granted(&self, event: &AuthGrantedEvent) -> Result<()>;

    /// Process a payment status response from the settlement poll
    ///
    /// Returns `false` if the payment has not settled (nothing to do yet).
    /// If it has, calls the contract's `paymentComplete` method and returns
    /// `true` so the caller stops checking the payment.
    async fn process_payment_status(&self, status: &PaymentStatusResponse) -> Result<bool>;
}

/// Non-persistent [`EventHandler`] over in-memory stores
pub struct PaymentEventHandler {
    ledger: Arc<dyn LedgerClient>,
    bank: Arc<dyn BankClient>,
    identity: Identity,
    beneficiary: AccountDetails,
    correlations: Arc<dyn CorrelationStore>,
    schedule: Arc<dyn PaymentSchedule>,
}

impl PaymentEventHandler {
    /// Create a handler over the given collaborators and stores
    pub fn new(
        ledger: Arc<dyn LedgerClient>,
        bank: Arc<dyn BankClient>,
        identity: Identity,
        beneficiary: AccountDetails,
        correlations: Arc<dyn CorrelationStore>,
        schedule: Arc<dyn PaymentSchedule>,
    ) -> Self {
        Self {
            ledger,
            bank,
            identity,
            beneficiary,
            correlations,
            schedule,
        }
    }

    fn open_payload<T: serde::de::DeserializeOwned>(&self, data: &[u8]) -> Result<T> {
        let sealed = SealedEnvelope::from_json(data)?;
        let plaintext = self.identity.decrypt(&sealed)?;
        serde_json::from_slice(&plaintext).map_err(|e| Error::Payload(e.to_string()))
    }
}

#[async_trait]
impl EventHandler for PaymentEventHandler {
    async fn process_mint_request(&self, event: &MintRequestEvent) -> Result<()> {
        let request_id = event.request_id;
        info!(request_id = %request_id, block = event.block_number, "MintRequest event");

        let payload: MintRequestPayload = self.open_payload(&event.encrypted_data)?;
        let payer_key = decode_public_key(&payload.public_key)?;
        let auth_request = payment_auth_request(event, &payload)?;

        let token = self.bank.get_access_token(&request_id.to_hex()).await?;
        let consent = self
            .bank
            .create_consent(&auth_request, &token, &self.beneficiary)
            .await?;

        let response = AuthRequestPayload {
            url: consent.url.clone(),
            consent_id: consent.consent_id.clone(),
        };
        let response_json =
            serde_json::to_vec(&response).map_err(|e| Error::Payload(e.to_string()))?;
        let sealed = self.identity.encrypt(&response_json, &payer_key)?;

        let tx = self.ledger.auth_request(request_id, sealed.to_json()?).await?;

        // Committed only after the consent and the write-back both succeeded
        self.correlations
            .insert(CorrelationRecord::new(request_id, consent.consent_id, auth_request))
            .await;

        info!(
            request_id = %request_id,
            tx_hash = %tx.hash,
            "MintRequest processed, AuthRequest call submitted"
        );
        Ok(())
    }

    async fn process_auth_granted(&self, event: &AuthGrantedEvent) -> Result<()> {
        let request_id = event.request_id;
        info!(request_id = %request_id, block = event.block_number, "AuthGranted event");

        let payload: AuthGrantedPayload = self.open_payload(&event.grant_encrypted_data)?;

        // Must exist before any bank call is made
        let record = self
            .correlations
            .get(&request_id)
            .await
            .ok_or_else(|| Error::UnknownRequest {
                request_id: request_id.to_hex(),
            })?;

        let grant = PaymentGrant {
            request_id: request_id.to_hex(),
            consent_id: record.consent_id.clone(),
            consent_code: payload.consent_code,
        };
        let submitted = self
            .bank
            .submit_payment(&grant, &record.payment_request, &self.beneficiary)
            .await?;

        info!(
            request_id = %request_id,
            payment_id = %submitted.payment_id,
            "payment submitted"
        );

        let payment_id = submitted.payment_id.clone();
        if !self
            .schedule
            .schedule_payment(ScheduledPayment::new(request_id, submitted))
            .await
        {
            // A duplicate here means the same request was authorized twice.
            // The payment is already moving, so this is an anomaly to
            // investigate, not a failure of this step.
            error!(
                request_id = %request_id,
                payment_id = %payment_id,
                "duplicate payment schedule for request id"
            );
        }

        info!(request_id = %request_id, payment_id = %payment_id, "AuthGranted processed");
        Ok(())
    }

    async fn process_payment_status(&self, status: &PaymentStatusResponse) -> Result<bool> {
        info!(
            request_id = %status.request_id,
            payment_id = %status.payment_id,
            status = %status.status,
            settled = status.settled,
            "payment status response"
        );

        if !status.settled {
            debug!(request_id = %status.request_id, "payment not yet settled");
            return Ok(false);
        }

        let request_id = RequestId::from_hex(&status.request_id)?;
        let tx = self.ledger.payment_complete(request_id).await?;

        // The workflow is finished; drop its correlation record
        if self.correlations.remove(&request_id).await.is_some() {
            debug!(request_id = %request_id, "correlation record evicted");
        }

        info!(
            request_id = %request_id,
            payment_id = %status.payment_id,
            tx_hash = %tx.hash,
            "PaymentComplete call submitted"
        );
        Ok(true)
    }
}
