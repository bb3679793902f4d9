//! Turns the terminal state of one HTTP exchange into a `ResponseOutcome`.
//!
//! # Design
//! Classification is a pure function of one exchange: the classifier holds
//! only the optional error-body decoder and keeps no state between calls, so
//! a single instance can be cloned into worker threads freely. It never
//! returns `Err` and never panics on input; every fault is folded into
//! `NetworkFailure` or `UnknownFailure`.
//!
//! When no error decoder is configured the caller has opted out of error
//! bodies and always gets `ErrorEmpty`. When one is configured, a missing,
//! empty or undecodable error body is reported as `UnknownFailure` rather
//! than silently degrading to `ErrorEmpty`.

use std::fmt;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::decoder::{BodyDecoder, JsonDecoder};
use crate::error::{BoxError, OutcomeError, TransportError};
use crate::http::{HttpResponse, ResponseBody};
use crate::outcome::ResponseOutcome;

/// Stateless classifier parameterized by the error-body type `E`.
pub struct OutcomeClassifier<E> {
    error_decoder: Option<Arc<dyn BodyDecoder<E>>>,
}

impl<E> OutcomeClassifier<E> {
    /// A classifier that never decodes error bodies.
    pub fn new() -> Self {
        Self {
            error_decoder: None,
        }
    }

    /// A classifier that decodes error bodies with `decoder`.
    pub fn with_error_decoder<D>(decoder: D) -> Self
    where
        D: BodyDecoder<E> + 'static,
    {
        Self {
            error_decoder: Some(Arc::new(decoder)),
        }
    }

    pub fn decodes_error_body(&self) -> bool {
        self.error_decoder.is_some()
    }

    /// Classify either a structural response or a failure.
    pub fn classify<S>(&self, result: Result<HttpResponse<S>, BoxError>) -> ResponseOutcome<S, E> {
        match result {
            Ok(response) => self.classify_response(response),
            Err(failure) => self.classify_failure(failure),
        }
    }

    /// Classify a response that reached the application layer.
    pub fn classify_response<S>(&self, response: HttpResponse<S>) -> ResponseOutcome<S, E> {
        let code = response.status;

        let outcome = if response.is_success() {
            match response.body {
                Some(body) => ResponseOutcome::Success { code, body },
                None => ResponseOutcome::SuccessEmpty { code },
            }
        } else {
            match &self.error_decoder {
                None => ResponseOutcome::ErrorEmpty { code },
                Some(decoder) => match decode_error_body(decoder.as_ref(), response.error_body) {
                    Ok(body) => ResponseOutcome::Error { code, body },
                    Err(cause) => {
                        warn!(
                            status = code,
                            contract_violation = cause.is_contract_violation(),
                            error = %cause,
                            "error body could not be decoded"
                        );
                        ResponseOutcome::UnknownFailure { cause }
                    }
                },
            }
        };

        debug!(status = code, outcome = outcome.kind(), "classified response");
        outcome
    }

    /// Classify an exchange that failed before producing a response.
    pub fn classify_failure<S>(&self, failure: BoxError) -> ResponseOutcome<S, E> {
        let outcome = match failure.downcast::<TransportError>() {
            Ok(cause) => ResponseOutcome::NetworkFailure { cause: *cause },
            Err(failure) => match failure.downcast::<io::Error>() {
                Ok(io_err) => ResponseOutcome::NetworkFailure {
                    cause: TransportError::from(*io_err),
                },
                Err(failure) => ResponseOutcome::UnknownFailure {
                    cause: OutcomeError::Unclassified(failure),
                },
            },
        };

        match &outcome {
            ResponseOutcome::NetworkFailure { cause } => {
                debug!(kind = ?cause.kind(), error = %cause, "classified network failure");
            }
            ResponseOutcome::UnknownFailure { cause } => {
                debug!(error = %cause, "classified unknown failure");
            }
            _ => {}
        }
        outcome
    }
}

impl<E: DeserializeOwned + 'static> OutcomeClassifier<E> {
    /// A classifier that decodes error bodies as JSON.
    pub fn json() -> Self {
        Self::with_error_decoder(JsonDecoder::<E>::new())
    }
}

impl<E> Default for OutcomeClassifier<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for OutcomeClassifier<E> {
    fn clone(&self) -> Self {
        Self {
            error_decoder: self.error_decoder.clone(),
        }
    }
}

impl<E> fmt::Debug for OutcomeClassifier<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutcomeClassifier")
            .field("decodes_error_body", &self.decodes_error_body())
            .finish()
    }
}

/// Run the decoder at most once; the body is moved into it. A panicking
/// decoder is reported as a decode fault.
fn decode_error_body<E>(
    decoder: &dyn BodyDecoder<E>,
    body: Option<ResponseBody>,
) -> Result<E, OutcomeError> {
    let body = body.ok_or(OutcomeError::MissingErrorBody)?;
    if body.is_empty() {
        return Err(OutcomeError::EmptyErrorBody);
    }
    debug!(
        content_type = body.content_type(),
        length = ?body.content_length(),
        "decoding error body"
    );
    panic::catch_unwind(AssertUnwindSafe(|| decoder.decode(body)))
        .unwrap_or_else(|_| Err("error body decoder panicked".into()))
        .map_err(OutcomeError::Decode)?
        .ok_or(OutcomeError::NullErrorBody)
}
