//! Periodic tasks: settlement polling and pull-based event polling
//!
//! Both tasks run a single best-effort cycle per tick. There is no backoff
//! and no retry cap: a failed status check or filter call is simply retried
//! on the next cycle.

use crate::handler::EventHandler;
use crate::schedule::PaymentSchedule;
use bank_api::BankClient;
use chain_events::LedgerClient;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{error, info};

/// Polls the bank for the settlement status of scheduled payments
pub struct PaymentStatusTask {
    schedule: Arc<dyn PaymentSchedule>,
    bank: Arc<dyn BankClient>,
    handler: Arc<dyn EventHandler>,
}

impl PaymentStatusTask {
    /// Create a status poll task
    pub fn new(
        schedule: Arc<dyn PaymentSchedule>,
        bank: Arc<dyn BankClient>,
        handler: Arc<dyn EventHandler>,
    ) -> Self {
        Self {
            schedule,
            bank,
            handler,
        }
    }

    /// Run one poll cycle over a snapshot of the schedule
    ///
    /// Payments are checked serially: the status API session model assumes
    /// one in-flight inquiry at a time. One payment's failure is logged and
    /// leaves it scheduled for the next cycle; it never stops the others.
    pub async fn check_payment_statuses(&self) {
        for scheduled in self.schedule.scheduled_payments().await {
            info!(
                request_id = %scheduled.request_id,
                payment_id = %scheduled.payment.payment_id,
                "checking payment status"
            );

            let status = match self.bank.get_status(&scheduled.payment).await {
                Ok(status) => status,
                Err(e) => {
                    error!(
                        request_id = %scheduled.request_id,
                        payment_id = %scheduled.payment.payment_id,
                        error = %e,
                        "error getting payment status"
                    );
                    continue;
                }
            };

            match self.handler.process_payment_status(&status).await {
                Ok(true) => {
                    self.schedule.unschedule_payment(&scheduled.request_id).await;
                }
                Ok(false) => {}
                Err(e) => {
                    error!(
                        request_id = %scheduled.request_id,
                        payment_id = %scheduled.payment.payment_id,
                        error = %e,
                        "error processing payment status response"
                    );
                }
            }
        }
    }

    /// Poll on a fixed period until the task is dropped
    pub async fn run(self: Arc<Self>, period: Duration) {
        info!(period_secs = period.as_secs(), "starting payment status poll");

        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.check_payment_statuses().await;
        }
    }
}

/// Pull-based event polling for environments without push subscriptions
///
/// Each cycle re-scans `[next_block, latest]` for both event types and
/// advances the watermark past the highest block seen. Re-processing after
/// a restart mid-range is tolerated, not prevented.
pub struct ChainEventTask {
    ledger: Arc<dyn LedgerClient>,
    handler: Arc<dyn EventHandler>,
    next_block: AtomicU64,
}

impl ChainEventTask {
    /// Create an event poll task starting at `starting_block`
    pub fn new(starting_block: u64, ledger: Arc<dyn LedgerClient>, handler: Arc<dyn EventHandler>) -> Self {
        Self {
            ledger,
            handler,
            next_block: AtomicU64::new(starting_block),
        }
    }

    /// The block the next cycle will scan from
    pub fn next_block(&self) -> u64 {
        self.next_block.load(Ordering::Acquire)
    }

    /// Run one poll cycle over both event types
    ///
    /// The watermark only advances when both filter calls succeed, so a
    /// failed scan of either type is retried in full on the next cycle.
    /// Handler errors are logged per event and do not hold the watermark
    /// back (push subscriptions would not redeliver either).
    pub async fn poll_once(&self) {
        let from = self.next_block.load(Ordering::Acquire);

        let mint_last = self.fetch_and_process_mint_requests(from).await;
        let auth_last = self.fetch_and_process_auth_granted(from).await;

        if let (Ok(mint_last), Ok(auth_last)) = (mint_last, auth_last) {
            if let Some(last_seen) = mint_last.max(auth_last) {
                self.next_block.store(last_seen + 1, Ordering::Release);
            }
        }
    }

    /// Returns the highest block a `MintRequest` event was seen in, if any
    async fn fetch_and_process_mint_requests(&self, from: u64) -> chain_events::Result<Option<u64>> {
        let events = match self.ledger.filter_mint_requests(from, None).await {
            Ok(events) => events,
            Err(e) => {
                error!(from_block = from, error = %e, "error fetching MintRequest events");
                return Err(e);
            }
        };

        let mut last_seen = None;
        for event in events {
            info!(request_id = %event.request_id, block = event.block_number, "processing MintRequest event");
            if let Err(e) = self.handler.process_mint_request(&event).await {
                error!(request_id = %event.request_id, error = %e, "error processing MintRequest event");
            }
            last_seen = last_seen.max(Some(event.block_number));
        }
        Ok(last_seen)
    }

    /// Returns the highest block an `AuthGranted` event was seen in, if any
    async fn fetch_and_process_auth_granted(&self, from: u64) -> chain_events::Result<Option<u64>> {
        let events = match self.ledger.filter_auth_granted(from, None).await {
            Ok(events) => events,
            Err(e) => {
                error!(from_block = from, error = %e, "error fetching AuthGranted events");
                return Err(e);
            }
        };

        let mut last_seen = None;
        for event in events {
            info!(request_id = %event.request_id, block = event.block_number, "processing AuthGranted event");
            if let Err(e) = self.handler.process_auth_granted(&event).await {
                error!(request_id = %event.request_id, error = %e, "error processing AuthGranted event");
            }
            last_seen = last_seen.max(Some(event.block_number));
        }
        Ok(last_seen)
    }

    /// Poll on a fixed period until the task is dropped
    pub async fn run(self: Arc<Self>, period: Duration) {
        info!(
            period_secs = period.as_secs(),
            from_block = self.next_block(),
            "starting chain event poll"
        );

        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.poll_once().await;
        }
    }
}
