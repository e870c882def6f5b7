//! Correlation store: in-flight workflow state keyed by request id
//!
//! The store is a swappable trait so tests run against the in-memory
//! implementation and a deployment can substitute a durable one. The
//! in-memory map tolerates concurrent read/write from independent event
//! listeners.

use async_trait::async_trait;
use bank_api::PaymentAuthRequest;
use chain_events::RequestId;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

/// State cached between a mint request and its matching consent approval
#[derive(Debug, Clone)]
pub struct CorrelationRecord {
    /// Correlation key
    pub request_id: RequestId,

    /// Bank-side consent identifier
    pub consent_id: String,

    /// Original consent request, replayed verbatim on submission
    pub payment_request: PaymentAuthRequest,

    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl CorrelationRecord {
    /// Create a record for a freshly consented mint request
    pub fn new(request_id: RequestId, consent_id: String, payment_request: PaymentAuthRequest) -> Self {
        Self {
            request_id,
            consent_id,
            payment_request,
            created_at: Utc::now(),
        }
    }
}

/// Storage for in-flight correlation records
#[async_trait]
pub trait CorrelationStore: Send + Sync {
    /// Insert (or replace) the record for its request id
    async fn insert(&self, record: CorrelationRecord);

    /// Look up the record for a request id
    async fn get(&self, request_id: &RequestId) -> Option<CorrelationRecord>;

    /// Remove and return the record for a request id
    async fn remove(&self, request_id: &RequestId) -> Option<CorrelationRecord>;
}

/// Concurrent in-memory correlation store
#[derive(Debug, Default)]
pub struct InMemoryCorrelationStore {
    records: DashMap<RequestId, CorrelationRecord>,
}

impl InMemoryCorrelationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CorrelationStore for InMemoryCorrelationStore {
    async fn insert(&self, record: CorrelationRecord) {
        self.records.insert(record.request_id, record);
    }

    async fn get(&self, request_id: &RequestId) -> Option<CorrelationRecord> {
        self.records.get(request_id).map(|r| r.clone())
    }

    async fn remove(&self, request_id: &RequestId) -> Option<CorrelationRecord> {
        self.records.remove(request_id).map(|(_, r)| r)
    }
}
