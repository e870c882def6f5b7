//! Event subscriber: one concurrent listener per ledger event type
//!
//! Subscribe/unsubscribe are idempotent. Each subscription spawns a
//! long-running listener that dispatches events to the handler and logs
//! (never propagates) processing errors, so one bad event cannot kill the
//! stream. Unsubscribing signals the listener to stop; an event already
//! being processed completes in the background.

use crate::handler::EventHandler;
use crate::Result;
use chain_events::{AuthGrantedEvent, EventSubscription, LedgerClient, MintRequestEvent};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// Ledger event types the subscriber can listen for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum EventKind {
    MintRequest,
    AuthGranted,
}

struct Listener {
    shutdown: watch::Sender<bool>,
}

/// Maintains at most one active subscription per ledger event type
pub struct EventSubscriber {
    handler: Arc<dyn EventHandler>,
    ledger: Arc<dyn LedgerClient>,
    listeners: Mutex<HashMap<EventKind, Listener>>,
}

impl EventSubscriber {
    /// Create a subscriber dispatching to `handler`
    ///
    /// The instance does not persist events and has no dead-letter queue:
    /// an event whose processing fails is only seen again if the ledger
    /// redelivers it.
    pub fn new(handler: Arc<dyn EventHandler>, ledger: Arc<dyn LedgerClient>) -> Self {
        Self {
            handler,
            ledger,
            listeners: Mutex::new(HashMap::new()),
        }
    }

    /// Subscribe to `MintRequest` events
    ///
    /// Returns `false` without error if already subscribed.
    pub async fn subscribe_mint_requests(&self) -> Result<bool> {
        if self.listeners.lock().contains_key(&EventKind::MintRequest) {
            debug!("already subscribed to MintRequest events");
            return Ok(false);
        }

        let subscription = self.ledger.watch_mint_requests().await?;
        let (shutdown, shutdown_rx) = watch::channel(false);
        let handler = self.handler.clone();
        tokio::spawn(async move {
            mint_request_listener(subscription, handler, shutdown_rx).await;
        });

        info!("subscribed to MintRequest events");
        Ok(self.register(EventKind::MintRequest, Listener { shutdown }))
    }

    /// Stop listening for `MintRequest` events
    ///
    /// Returns `false` if there was no subscription.
    pub fn unsubscribe_mint_requests(&self) -> bool {
        self.deregister(EventKind::MintRequest)
    }

    /// Subscribe to `AuthGranted` events
    ///
    /// Returns `false` without error if already subscribed.
    pub async fn subscribe_auth_granted(&self) -> Result<bool> {
        if self.listeners.lock().contains_key(&EventKind::AuthGranted) {
            debug!("already subscribed to AuthGranted events");
            return Ok(false);
        }

        let subscription = self.ledger.watch_auth_granted().await?;
        let (shutdown, shutdown_rx) = watch::channel(false);
        let handler = self.handler.clone();
        tokio::spawn(async move {
            auth_granted_listener(subscription, handler, shutdown_rx).await;
        });

        info!("subscribed to AuthGranted events");
        Ok(self.register(EventKind::AuthGranted, Listener { shutdown }))
    }

    /// Stop listening for `AuthGranted` events
    ///
    /// Returns `false` if there was no subscription.
    pub fn unsubscribe_auth_granted(&self) -> bool {
        self.deregister(EventKind::AuthGranted)
    }

    fn register(&self, kind: EventKind, listener: Listener) -> bool {
        use std::collections::hash_map::Entry;

        match self.listeners.lock().entry(kind) {
            Entry::Occupied(_) => {
                // A racing subscribe won; stop the spare listener
                let _ = listener.shutdown.send(true);
                false
            }
            Entry::Vacant(slot) => {
                slot.insert(listener);
                true
            }
        }
    }

    fn deregister(&self, kind: EventKind) -> bool {
        match self.listeners.lock().remove(&kind) {
            Some(listener) => {
                let _ = listener.shutdown.send(true);
                true
            }
            None => {
                debug!(kind = ?kind, "not subscribed");
                false
            }
        }
    }
}

async fn mint_request_listener(
    mut subscription: EventSubscription<MintRequestEvent>,
    handler: Arc<dyn EventHandler>,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        tokio::select! {
            event = subscription.events.recv() => match event {
                Some(event) => {
                    info!(request_id = %event.request_id, "received MintRequest event");
                    if let Err(e) = handler.process_mint_request(&event).await {
                        error!(request_id = %event.request_id, error = %e, "error processing MintRequest event");
                    }
                }
                None => {
                    warn!("MintRequest event stream closed");
                    break;
                }
            },
            Some(e) = subscription.errors.recv() => {
                error!(error = %e, "error while listening to MintRequest events");
            }
            _ = shutdown.changed() => break,
        }
    }
}

async fn auth_granted_listener(
    mut subscription: EventSubscription<AuthGrantedEvent>,
    handler: Arc<dyn EventHandler>,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        tokio::select! {
            event = subscription.events.recv() => match event {
                Some(event) => {
                    info!(request_id = %event.request_id, "received AuthGranted event");
                    if let Err(e) = handler.process_auth_granted(&event).await {
                        error!(request_id = %event.request_id, error = %e, "error processing AuthGranted event");
                    }
                }
                None => {
                    warn!("AuthGranted event stream closed");
                    break;
                }
            },
            Some(e) = subscription.errors.recv() => {
                error!(error = %e, "error while listening to AuthGranted events");
            }
            _ = shutdown.changed() => break,
        }
    }
}
