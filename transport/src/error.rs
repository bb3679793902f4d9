//! Errors raised by the ureq transport before classification.
//!
//! # Design
//! Anything that stops the exchange at the wire level is converted to
//! `TransportError` here so the classifier reports it as `NetworkFailure`:
//! I/O, timeouts, DNS, connect and proxy failures, TLS faults, redirect
//! loops and responses that are not valid HTTP. Everything else ureq can
//! raise (bad URIs, body limits, request-side misuse) is passed through
//! untouched and ends up as `UnknownFailure`.

use std::io;

use outcome_core::{BoxError, TransportError};
use thiserror::Error;

/// Misuse of a call or its request, detected without touching the network.
#[derive(Debug, Error)]
pub enum ClientError {
    /// `execute` or `enqueue` ran on a call that already ran.
    #[error("call already executed")]
    AlreadyExecuted,

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Map a ureq error onto the failure the classifier should see.
pub fn map_ureq_error(err: ureq::Error) -> BoxError {
    let kind = match &err {
        ureq::Error::Io(e) => Some(e.kind()),
        ureq::Error::Timeout(_) => Some(io::ErrorKind::TimedOut),
        ureq::Error::HostNotFound => Some(io::ErrorKind::NotFound),
        ureq::Error::ConnectionFailed => Some(io::ErrorKind::ConnectionRefused),
        ureq::Error::Protocol(_) | ureq::Error::Tls(_) => Some(io::ErrorKind::InvalidData),
        ureq::Error::TooManyRedirects | ureq::Error::ConnectProxyFailed(_) => {
            Some(io::ErrorKind::ConnectionAborted)
        }
        _ => None,
    };
    match kind {
        Some(kind) => Box::new(TransportError::new(kind, err)),
        None => Box::new(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_become_transport_errors() {
        let err = ureq::Error::Io(io::Error::new(io::ErrorKind::ConnectionReset, "reset"));
        let mapped = map_ureq_error(err);
        let transport = mapped.downcast::<TransportError>().unwrap();
        assert_eq!(transport.kind(), io::ErrorKind::ConnectionReset);
    }

    #[test]
    fn dns_failures_become_transport_errors() {
        let mapped = map_ureq_error(ureq::Error::HostNotFound);
        let transport = mapped.downcast::<TransportError>().unwrap();
        assert_eq!(transport.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn connect_failures_become_transport_errors() {
        let mapped = map_ureq_error(ureq::Error::ConnectionFailed);
        assert!(mapped.downcast::<TransportError>().is_ok());
    }

    #[test]
    fn redirect_loops_become_transport_errors() {
        let mapped = map_ureq_error(ureq::Error::TooManyRedirects);
        let transport = mapped.downcast::<TransportError>().unwrap();
        assert_eq!(transport.kind(), io::ErrorKind::ConnectionAborted);
    }

    #[test]
    fn proxy_failures_become_transport_errors() {
        let mapped = map_ureq_error(ureq::Error::ConnectProxyFailed("407".to_string()));
        let transport = mapped.downcast::<TransportError>().unwrap();
        assert_eq!(transport.kind(), io::ErrorKind::ConnectionAborted);
    }

    #[test]
    fn other_errors_pass_through() {
        let mapped = map_ureq_error(ureq::Error::StatusCode(418));
        assert!(mapped.downcast::<ureq::Error>().is_ok());
    }

    #[test]
    fn already_executed_message() {
        assert_eq!(ClientError::AlreadyExecuted.to_string(), "call already executed");
    }
}
