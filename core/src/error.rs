//! Failure causes carried by `ResponseOutcome`.
//!
//! # Design
//! Two types cover every way an exchange can end without a usable status:
//! `TransportError` for exchanges that never produced a structural response
//! (connect, DNS, timeout, reset, cancellation) and `OutcomeError` for
//! everything else. `OutcomeError` separates contract violations (an error
//! body was expected but missing), decode faults and unclassified faults so
//! callers can log them precisely without a seventh outcome variant.

use std::io;

use thiserror::Error;

/// Type-erased error used at the transport and decoder seams.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The exchange failed before a structural response was obtained.
///
/// Wraps the underlying `std::io::Error`; transport adapters map their own
/// connectivity errors onto an `io::ErrorKind` when they construct one.
#[derive(Debug, Error)]
#[error("transport failure: {source}")]
pub struct TransportError {
    source: io::Error,
}

impl TransportError {
    /// Wrap an arbitrary error under the given I/O kind.
    pub fn new<E>(kind: io::ErrorKind, error: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self {
            source: io::Error::new(kind, error),
        }
    }

    /// The exchange was canceled by the caller.
    pub fn canceled() -> Self {
        Self::new(io::ErrorKind::Interrupted, "canceled")
    }

    pub fn kind(&self) -> io::ErrorKind {
        self.source.kind()
    }

    pub fn is_timeout(&self) -> bool {
        self.kind() == io::ErrorKind::TimedOut
    }

    pub fn is_canceled(&self) -> bool {
        self.kind() == io::ErrorKind::Interrupted
    }

    pub fn get_ref(&self) -> &io::Error {
        &self.source
    }

    pub fn into_inner(self) -> io::Error {
        self.source
    }
}

impl From<io::Error> for TransportError {
    fn from(source: io::Error) -> Self {
        Self { source }
    }
}

/// Any failure that is not a transport failure.
#[derive(Debug, Error)]
pub enum OutcomeError {
    /// A non-2xx response carried no error body although a decoder was set.
    #[error("missing error body")]
    MissingErrorBody,

    /// A non-2xx response reported a zero-length error body.
    #[error("empty error body")]
    EmptyErrorBody,

    /// The error-body decoder succeeded but produced no value.
    #[error("error body decoded to nothing")]
    NullErrorBody,

    /// The error body could not be decoded into the requested type.
    #[error("failed to decode error body: {0}")]
    Decode(#[source] BoxError),

    /// Any other fault surfaced by the call, e.g. a success-body decode error.
    #[error(transparent)]
    Unclassified(BoxError),
}

impl OutcomeError {
    /// True for the variants raised when an expected error body is unusable
    /// before decoding starts.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            OutcomeError::MissingErrorBody | OutcomeError::EmptyErrorBody | OutcomeError::NullErrorBody
        )
    }

    /// Build an `Unclassified` error from a plain message.
    pub fn unclassified(message: impl Into<String>) -> Self {
        OutcomeError::Unclassified(message.into().into())
    }

    /// Variant name without payload, used for comparison and logging.
    pub fn label(&self) -> &'static str {
        match self {
            OutcomeError::MissingErrorBody => "missing_error_body",
            OutcomeError::EmptyErrorBody => "empty_error_body",
            OutcomeError::NullErrorBody => "null_error_body",
            OutcomeError::Decode(_) => "decode",
            OutcomeError::Unclassified(_) => "unclassified",
        }
    }
}
