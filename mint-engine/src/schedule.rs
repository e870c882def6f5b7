//! Settlement schedule: payments awaiting settlement confirmation
//!
//! Keyed by request id with duplicate-insert detection; at most one
//! scheduled payment per request id at any time.

use async_trait::async_trait;
use bank_api::SubmitPaymentResponse;
use chain_events::RequestId;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::info;

/// A submitted payment whose settlement is being polled
#[derive(Debug, Clone)]
pub struct ScheduledPayment {
    /// Correlation key
    pub request_id: RequestId,

    /// The bank's submission response, replayed on status inquiries
    pub payment: SubmitPaymentResponse,

    /// When the payment was scheduled
    pub scheduled_at: DateTime<Utc>,
}

impl ScheduledPayment {
    /// Schedule a freshly submitted payment
    pub fn new(request_id: RequestId, payment: SubmitPaymentResponse) -> Self {
        Self {
            request_id,
            payment,
            scheduled_at: Utc::now(),
        }
    }
}

/// Storage for payments awaiting settlement
#[async_trait]
pub trait PaymentSchedule: Send + Sync {
    /// Add a payment; returns `false` without replacing if the request id
    /// is already scheduled
    async fn schedule_payment(&self, payment: ScheduledPayment) -> bool;

    /// Remove a payment; returns `false` if it was not scheduled
    async fn unschedule_payment(&self, request_id: &RequestId) -> bool;

    /// Snapshot of all currently scheduled payments
    async fn scheduled_payments(&self) -> Vec<ScheduledPayment>;
}

/// Concurrent in-memory settlement schedule
#[derive(Debug, Default)]
pub struct InMemoryPaymentSchedule {
    payments: DashMap<RequestId, ScheduledPayment>,
}

impl InMemoryPaymentSchedule {
    /// Create an empty schedule
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentSchedule for InMemoryPaymentSchedule {
    async fn schedule_payment(&self, payment: ScheduledPayment) -> bool {
        use dashmap::mapref::entry::Entry;

        info!(
            request_id = %payment.request_id,
            payment_id = %payment.payment.payment_id,
            "scheduling payment"
        );

        match self.payments.entry(payment.request_id) {
            Entry::Occupied(_) => {
                info!(
                    request_id = %payment.request_id,
                    payment_id = %payment.payment.payment_id,
                    "payment already scheduled"
                );
                false
            }
            Entry::Vacant(slot) => {
                slot.insert(payment);
                true
            }
        }
    }

    async fn unschedule_payment(&self, request_id: &RequestId) -> bool {
        if self.payments.remove(request_id).is_some() {
            info!(request_id = %request_id, "unscheduled payment");
            true
        } else {
            info!(request_id = %request_id, "payment not scheduled");
            false
        }
    }

    async fn scheduled_payments(&self) -> Vec<ScheduledPayment> {
        self.payments.iter().map(|entry| entry.value().clone()).collect()
    }
}
