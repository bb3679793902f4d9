//! Typed outcomes for single HTTP exchanges.
//!
//! # Overview
//! Every HTTP call ends in exactly one `ResponseOutcome`: success with or
//! without a body, error with or without a decoded error body, a network
//! failure, or an unknown failure. Callers `match` on the outcome instead of
//! threading `Result`s and status checks through their code.
//!
//! # Design
//! - `OutcomeClassifier` is a stateless, total function from one exchange's
//!   terminal state to a `ResponseOutcome`.
//! - Transports implement `Call`; `CallExt::classified` wraps any call into an
//!   `OutcomeCall` whose blocking, callback and async modes all classify
//!   through the same routine.
//! - The core does no I/O of its own beyond running the error-body decoder.

pub mod call;
pub mod classifier;
pub mod decoder;
pub mod error;
pub mod http;
pub mod outcome;

pub use call::{Call, CallExt, CallResult, Callback, OutcomeCall};
pub use classifier::OutcomeClassifier;
pub use decoder::{BodyDecoder, Discard, JsonDecoder};
pub use error::{BoxError, OutcomeError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, ResponseBody};
pub use outcome::ResponseOutcome;
