//! MintBridge Bank API
//!
//! The seam between the correlation engine and an authorized-payment (open
//! banking) provider. Concrete HTTP clients live outside this workspace;
//! the engine only depends on the [`BankClient`] trait and the
//! request/response types defined here.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod client;
pub mod error;
pub mod types;

pub use client::BankClient;
pub use error::{Error, Result};
pub use types::{
    AccessToken, AccountDetails, ConsentResponse, PaymentAuthRequest, PaymentGrant,
    PaymentStatusResponse, SubmitPaymentResponse,
};
