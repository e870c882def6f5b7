//! Mock collaborators shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use bank_api::{
    AccessToken, AccountDetails, BankClient, ConsentResponse, PaymentAuthRequest, PaymentGrant,
    PaymentStatusResponse, SubmitPaymentResponse,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chain_events::{
    AuthGrantedEvent, EventSubscription, LedgerClient, MintRequestEvent, RequestId, TxHandle,
};
use envelope::Identity;
use mint_engine::{AuthGrantedPayload, MintRequestPayload};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::mpsc;

/// Scripted bank collaborator recording every call
#[derive(Default)]
pub struct MockBankClient {
    pub token_calls: AtomicUsize,
    pub consent_calls: Mutex<Vec<(PaymentAuthRequest, AccountDetails)>>,
    pub submit_calls: Mutex<Vec<(PaymentGrant, PaymentAuthRequest)>>,
    pub status_calls: Mutex<Vec<String>>,
    /// payment_id → settled; missing ids fail the status call
    pub statuses: Mutex<std::collections::HashMap<String, bool>>,
    pub fail_consent: AtomicBool,
    pub fail_submit: AtomicBool,
}

impl MockBankClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&self, payment_id: &str, settled: bool) {
        self.statuses
            .lock()
            .unwrap()
            .insert(payment_id.to_string(), settled);
    }
}

#[async_trait]
impl BankClient for MockBankClient {
    async fn get_access_token(&self, request_id: &str) -> bank_api::Result<AccessToken> {
        self.token_calls.fetch_add(1, Ordering::SeqCst);
        Ok(AccessToken {
            token: format!("token-{}", request_id),
            expires_in: 600,
        })
    }

    async fn create_consent(
        &self,
        request: &PaymentAuthRequest,
        _access: &AccessToken,
        beneficiary: &AccountDetails,
    ) -> bank_api::Result<ConsentResponse> {
        if self.fail_consent.load(Ordering::SeqCst) {
            return Err(bank_api::Error::Api {
                status: 500,
                message: "consent rejected".to_string(),
            });
        }

        let mut calls = self.consent_calls.lock().unwrap();
        calls.push((request.clone(), beneficiary.clone()));
        let consent_id = format!("consent-{}", calls.len());

        Ok(ConsentResponse {
            request_id: request.request_id.clone(),
            url: format!("https://bank.example/authorize/{}", consent_id),
            consent_id,
        })
    }

    async fn submit_payment(
        &self,
        grant: &PaymentGrant,
        request: &PaymentAuthRequest,
        _beneficiary: &AccountDetails,
    ) -> bank_api::Result<SubmitPaymentResponse> {
        if self.fail_submit.load(Ordering::SeqCst) {
            return Err(bank_api::Error::Api {
                status: 500,
                message: "submission rejected".to_string(),
            });
        }

        let mut calls = self.submit_calls.lock().unwrap();
        calls.push((grant.clone(), request.clone()));

        Ok(SubmitPaymentResponse {
            request_id: grant.request_id.clone(),
            consent_token: format!("consent-token-{}", calls.len()),
            payment_id: format!("payment-{}", calls.len()),
        })
    }

    async fn get_status(
        &self,
        payment: &SubmitPaymentResponse,
    ) -> bank_api::Result<PaymentStatusResponse> {
        self.status_calls
            .lock()
            .unwrap()
            .push(payment.payment_id.clone());

        let settled = self
            .statuses
            .lock()
            .unwrap()
            .get(&payment.payment_id)
            .copied()
            .ok_or_else(|| bank_api::Error::Transport("status unavailable".to_string()))?;

        Ok(PaymentStatusResponse {
            request_id: payment.request_id.clone(),
            payment_id: payment.payment_id.clone(),
            status: if settled { "Settled" } else { "Pending" }.to_string(),
            settled,
        })
    }
}

/// Scripted ledger collaborator with pushable watch channels and an event log
#[derive(Default)]
pub struct MockLedgerClient {
    pub auth_request_calls: Mutex<Vec<(RequestId, Vec<u8>)>>,
    pub payment_complete_calls: Mutex<Vec<RequestId>>,
    pub mint_events: Mutex<Vec<MintRequestEvent>>,
    pub auth_events: Mutex<Vec<AuthGrantedEvent>>,
    pub fail_mint_filter: AtomicBool,
    pub fail_auth_filter: AtomicBool,
    pub fail_auth_request: AtomicBool,
    mint_sender: Mutex<Option<mpsc::Sender<MintRequestEvent>>>,
    auth_sender: Mutex<Option<mpsc::Sender<AuthGrantedEvent>>>,
}

impl MockLedgerClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an event into the active MintRequest watch
    ///
    /// Returns `false` once the listener has gone away.
    pub async fn push_mint_event(&self, event: MintRequestEvent) -> bool {
        let sender = self.mint_sender.lock().unwrap().clone().expect("no active watch");
        sender.send(event).await.is_ok()
    }

    /// Push an event into the active AuthGranted watch
    ///
    /// Returns `false` once the listener has gone away.
    pub async fn push_auth_event(&self, event: AuthGrantedEvent) -> bool {
        let sender = self.auth_sender.lock().unwrap().clone().expect("no active watch");
        sender.send(event).await.is_ok()
    }

    /// Append an event to the filterable log
    pub fn log_mint_event(&self, event: MintRequestEvent) {
        self.mint_events.lock().unwrap().push(event);
    }

    /// Append an event to the filterable log
    pub fn log_auth_event(&self, event: AuthGrantedEvent) {
        self.auth_events.lock().unwrap().push(event);
    }
}

#[async_trait]
impl LedgerClient for MockLedgerClient {
    async fn watch_mint_requests(&self) -> chain_events::Result<EventSubscription<MintRequestEvent>> {
        let (event_tx, events) = mpsc::channel(16);
        let (_error_tx, errors) = mpsc::channel(16);
        *self.mint_sender.lock().unwrap() = Some(event_tx);
        Ok(EventSubscription { events, errors })
    }

    async fn watch_auth_granted(&self) -> chain_events::Result<EventSubscription<AuthGrantedEvent>> {
        let (event_tx, events) = mpsc::channel(16);
        let (_error_tx, errors) = mpsc::channel(16);
        *self.auth_sender.lock().unwrap() = Some(event_tx);
        Ok(EventSubscription { events, errors })
    }

    async fn filter_mint_requests(
        &self,
        from: u64,
        to: Option<u64>,
    ) -> chain_events::Result<Vec<MintRequestEvent>> {
        if self.fail_mint_filter.load(Ordering::SeqCst) {
            return Err(chain_events::Error::Filter("node unavailable".to_string()));
        }
        let to = to.unwrap_or(u64::MAX);
        Ok(self
            .mint_events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.block_number >= from && e.block_number <= to)
            .cloned()
            .collect())
    }

    async fn filter_auth_granted(
        &self,
        from: u64,
        to: Option<u64>,
    ) -> chain_events::Result<Vec<AuthGrantedEvent>> {
        if self.fail_auth_filter.load(Ordering::SeqCst) {
            return Err(chain_events::Error::Filter("node unavailable".to_string()));
        }
        let to = to.unwrap_or(u64::MAX);
        Ok(self
            .auth_events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.block_number >= from && e.block_number <= to)
            .cloned()
            .collect())
    }

    async fn auth_request(
        &self,
        request_id: RequestId,
        encrypted_payload: Vec<u8>,
    ) -> chain_events::Result<TxHandle> {
        if self.fail_auth_request.load(Ordering::SeqCst) {
            return Err(chain_events::Error::ContractCall("reverted".to_string()));
        }
        let mut calls = self.auth_request_calls.lock().unwrap();
        calls.push((request_id, encrypted_payload));
        Ok(TxHandle {
            hash: format!("0xaa{:02x}", calls.len()),
        })
    }

    async fn payment_complete(&self, request_id: RequestId) -> chain_events::Result<TxHandle> {
        let mut calls = self.payment_complete_calls.lock().unwrap();
        calls.push(request_id);
        Ok(TxHandle {
            hash: format!("0xbb{:02x}", calls.len()),
        })
    }
}

/// A payer-side identity plus helpers sealing payloads for the engine
pub struct Payer {
    pub identity: Identity,
}

impl Payer {
    pub fn new() -> Self {
        Self {
            identity: Identity::generate(),
        }
    }

    pub fn public_key_base64(&self) -> String {
        BASE64.encode(self.identity.public_encryption_key())
    }

    /// Build a MintRequest event carrying this payer's sealed bank details
    pub fn mint_request_event(
        &self,
        request_id: RequestId,
        amount: u128,
        block_number: u64,
        engine_key: &[u8; 32],
    ) -> MintRequestEvent {
        let payload = MintRequestPayload {
            institution_id: "monzo".to_string(),
            sort_code: "040004".to_string(),
            account_number: "12345678".to_string(),
            name: "A. Payer".to_string(),
            public_key: self.public_key_base64(),
        };
        let sealed = self
            .identity
            .encrypt(&serde_json::to_vec(&payload).unwrap(), engine_key)
            .unwrap();

        MintRequestEvent {
            request_id,
            amount,
            encrypted_data: sealed.to_json().unwrap(),
            block_number,
        }
    }

    /// Build an AuthGranted event carrying this payer's sealed consent code
    pub fn auth_granted_event(
        &self,
        request_id: RequestId,
        consent_code: &str,
        block_number: u64,
        engine_key: &[u8; 32],
    ) -> AuthGrantedEvent {
        let payload = AuthGrantedPayload {
            consent_code: consent_code.to_string(),
            public_key: self.public_key_base64(),
        };
        let sealed = self
            .identity
            .encrypt(&serde_json::to_vec(&payload).unwrap(), engine_key)
            .unwrap();

        AuthGrantedEvent {
            request_id,
            grant_encrypted_data: sealed.to_json().unwrap(),
            block_number,
        }
    }
}

/// Install a test subscriber so `RUST_LOG` surfaces engine tracing
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// The beneficiary account the engine is configured with
pub fn beneficiary() -> AccountDetails {
    AccountDetails {
        sort_code: "050005".to_string(),
        account_number: "87654321".to_string(),
        name: "Reserve Account".to_string(),
    }
}
