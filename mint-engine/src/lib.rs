//! MintBridge Correlation Engine
//!
//! Event-driven engine correlating on-chain mint requests with off-chain
//! bank payment authorization and settlement.
//!
//! # Architecture
//!
//! - **State machine**: one logical payment progresses
//!   `Requested → AuthPending → AuthGranted → Submitted → Settled`,
//!   driven by ledger events and bank status polls
//! - **Swappable stores**: correlation and schedule state behind traits,
//!   in-memory implementations backed by concurrent maps
//! - **One listener per event type**: slow processing of one event type
//!   never blocks the other
//! - **Best-effort settlement polling**: serial status checks, no backoff,
//!   failures retried on the next cycle
//!
//! # Invariants
//!
//! - At most one scheduled payment per request id at any time
//! - No partial commit: a failed workflow step leaves no correlation record
//!   and no ledger write-back
//! - A listener loop never terminates on a single event's processing error

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod amount;
pub mod config;
pub mod correlation;
pub mod error;
pub mod handler;
pub mod payload;
pub mod poll;
pub mod schedule;
pub mod subscriber;

pub use config::Config;
pub use correlation::{CorrelationRecord, CorrelationStore, InMemoryCorrelationStore};
pub use error::{Error, Result};
pub use handler::{EventHandler, PaymentEventHandler};
pub use payload::{AuthGrantedPayload, AuthRequestPayload, MintRequestPayload};
pub use poll::{ChainEventTask, PaymentStatusTask};
pub use schedule::{InMemoryPaymentSchedule, PaymentSchedule, ScheduledPayment};
pub use subscriber::EventSubscriber;
