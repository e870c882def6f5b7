//! MintBridge Chain Events
//!
//! The seam between the correlation engine and the public ledger. The
//! RPC/transaction-signing client lives outside this workspace; the engine
//! depends on the [`LedgerClient`] trait, the decoded event types and the
//! [`RequestId`] correlation key defined here.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod client;
pub mod error;
pub mod types;

pub use client::{EventSubscription, LedgerClient};
pub use error::{Error, Result};
pub use types::{AuthGrantedEvent, MintRequestEvent, RequestId, TxHandle};
