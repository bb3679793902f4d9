//! The closed set of results a classified HTTP call can produce.

use crate::error::{OutcomeError, TransportError};

/// Every possible result of one HTTP exchange.
///
/// - `Success`: 2xx with a decoded body.
/// - `SuccessEmpty`: 2xx with no body, or a body the caller did not ask for.
/// - `Error`: non-2xx with a decoded error body.
/// - `ErrorEmpty`: non-2xx where the caller did not ask for the error body.
/// - `NetworkFailure`: the exchange never produced a response.
/// - `UnknownFailure`: anything else, e.g. an undecodable error body.
#[derive(Debug)]
pub enum ResponseOutcome<S, E> {
    Success { code: u16, body: S },
    SuccessEmpty { code: u16 },
    Error { code: u16, body: E },
    ErrorEmpty { code: u16 },
    NetworkFailure { cause: TransportError },
    UnknownFailure { cause: OutcomeError },
}

impl<S, E> ResponseOutcome<S, E> {
    /// Status code of the structural response, if one was received.
    pub fn code(&self) -> Option<u16> {
        match self {
            ResponseOutcome::Success { code, .. }
            | ResponseOutcome::SuccessEmpty { code }
            | ResponseOutcome::Error { code, .. }
            | ResponseOutcome::ErrorEmpty { code } => Some(*code),
            ResponseOutcome::NetworkFailure { .. } | ResponseOutcome::UnknownFailure { .. } => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(
            self,
            ResponseOutcome::Success { .. } | ResponseOutcome::SuccessEmpty { .. }
        )
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self,
            ResponseOutcome::Error { .. } | ResponseOutcome::ErrorEmpty { .. }
        )
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            ResponseOutcome::NetworkFailure { .. } | ResponseOutcome::UnknownFailure { .. }
        )
    }

    /// Short variant name, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            ResponseOutcome::Success { .. } => "success",
            ResponseOutcome::SuccessEmpty { .. } => "success_empty",
            ResponseOutcome::Error { .. } => "error",
            ResponseOutcome::ErrorEmpty { .. } => "error_empty",
            ResponseOutcome::NetworkFailure { .. } => "network_failure",
            ResponseOutcome::UnknownFailure { .. } => "unknown_failure",
        }
    }
}

// Failure causes hold boxed errors, which have no equality of their own, so
// they compare by kind and rendered message.
impl<S: PartialEq, E: PartialEq> PartialEq for ResponseOutcome<S, E> {
    fn eq(&self, other: &Self) -> bool {
        use ResponseOutcome::*;
        match (self, other) {
            (Success { code: a, body: x }, Success { code: b, body: y }) => a == b && x == y,
            (SuccessEmpty { code: a }, SuccessEmpty { code: b }) => a == b,
            (Error { code: a, body: x }, Error { code: b, body: y }) => a == b && x == y,
            (ErrorEmpty { code: a }, ErrorEmpty { code: b }) => a == b,
            (NetworkFailure { cause: a }, NetworkFailure { cause: b }) => {
                a.kind() == b.kind() && a.to_string() == b.to_string()
            }
            (UnknownFailure { cause: a }, UnknownFailure { cause: b }) => {
                a.label() == b.label() && a.to_string() == b.to_string()
            }
            _ => false,
        }
    }
}
