//! The ledger collaborator trait

use crate::types::{AuthGrantedEvent, MintRequestEvent, RequestId, TxHandle};
use crate::{Error, Result};
use async_trait::async_trait;
use tokio::sync::mpsc;

/// A live push subscription to one ledger event type
///
/// `events` yields decoded events in emission order; `errors` carries
/// subscription-level transport failures. Dropping the subscription releases
/// the upstream watch.
#[derive(Debug)]
pub struct EventSubscription<T> {
    /// Decoded event stream
    pub events: mpsc::Receiver<T>,

    /// Transport errors from the underlying watch
    pub errors: mpsc::Receiver<Error>,
}

/// Client for the ledger contract
///
/// Watch methods are push-based; filter methods re-scan a block range for
/// pull-based polling. Contract calls return once the transaction has been
/// submitted, exposing at least its hash.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Watch for `MintRequest` events from the latest block onward
    async fn watch_mint_requests(&self) -> Result<EventSubscription<MintRequestEvent>>;

    /// Watch for `AuthGranted` events from the latest block onward
    async fn watch_auth_granted(&self) -> Result<EventSubscription<AuthGrantedEvent>>;

    /// Scan `[from, to]` for `MintRequest` events, in discovery order
    ///
    /// `to = None` means the latest block.
    async fn filter_mint_requests(&self, from: u64, to: Option<u64>)
        -> Result<Vec<MintRequestEvent>>;

    /// Scan `[from, to]` for `AuthGranted` events, in discovery order
    async fn filter_auth_granted(&self, from: u64, to: Option<u64>)
        -> Result<Vec<AuthGrantedEvent>>;

    /// Call the contract's `authRequest` method with the sealed response
    async fn auth_request(&self, request_id: RequestId, encrypted_payload: Vec<u8>)
        -> Result<TxHandle>;

    /// Call the contract's `paymentComplete` method
    async fn payment_complete(&self, request_id: RequestId) -> Result<TxHandle>;
}
