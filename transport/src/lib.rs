//! ureq-backed transport for `outcome-core`.
//!
//! # Overview
//! `HttpClient` builds requests against a base URL and turns each into a
//! `UreqCall`, which implements `outcome_core::Call`. Wrap a call with
//! `CallExt::classified` to receive a `ResponseOutcome` from `execute`,
//! `enqueue` or `send`.
//!
//! # Design
//! - ureq's status-as-error behavior is off; every status reaches the
//!   classifier as a structural response.
//! - Connectivity errors become `TransportError`, everything else is passed
//!   through and ends up as `UnknownFailure`.

pub mod client;
pub mod config;
pub mod error;

pub use client::{HttpClient, UreqCall};
pub use config::ClientConfig;
pub use error::ClientError;
