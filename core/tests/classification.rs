//! Classification properties checked across whole status ranges, plus the
//! reference scenarios.
//!
//! Bodies are `serde_json::Value` so inputs and expected outcomes can be
//! written inline as JSON.

use std::io;

use outcome_core::{
    BoxError, HttpResponse, OutcomeClassifier, OutcomeError, ResponseBody, ResponseOutcome,
    TransportError,
};
use serde_json::{json, Value};

type Outcome = ResponseOutcome<Value, Value>;

fn success_statuses() -> impl Iterator<Item = u16> {
    200..300
}

fn error_statuses() -> impl Iterator<Item = u16> {
    (100..200).chain(300..600)
}

fn body(raw: &str) -> Option<ResponseBody> {
    Some(ResponseBody::from_bytes(raw.as_bytes().to_vec()))
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn success_with_body_keeps_code_and_body() {
    let classifier = OutcomeClassifier::<Value>::json();
    for code in success_statuses() {
        let payload = json!({ "status": code });
        let outcome = classifier.classify_response(HttpResponse::success(code, Some(payload.clone())));
        assert_eq!(outcome, Outcome::Success { code, body: payload }, "status {code}");
    }
}

#[test]
fn success_without_body_is_success_empty() {
    let classifier = OutcomeClassifier::<Value>::json();
    for code in success_statuses() {
        let outcome = classifier.classify_response(HttpResponse::<Value>::success(code, None));
        assert_eq!(outcome, Outcome::SuccessEmpty { code }, "status {code}");
    }
}

#[test]
fn errors_without_decoder_are_error_empty() {
    let classifier = OutcomeClassifier::<Value>::new();
    for code in error_statuses() {
        for error_body in [None, body(""), body("{}"), body("<html>")] {
            let outcome = classifier.classify_response(HttpResponse::<Value>::error(code, error_body));
            assert_eq!(outcome, Outcome::ErrorEmpty { code }, "status {code}");
        }
    }
}

#[test]
fn errors_with_decoder_and_body_are_error() {
    let classifier = OutcomeClassifier::<Value>::json();
    for code in error_statuses() {
        let outcome =
            classifier.classify_response(HttpResponse::<Value>::error(code, body(r#"{"msg":"x"}"#)));
        assert_eq!(outcome, Outcome::Error { code, body: json!({ "msg": "x" }) }, "status {code}");
    }
}

#[test]
fn errors_with_decoder_and_no_usable_body_are_unknown() {
    let classifier = OutcomeClassifier::<Value>::json();
    for code in error_statuses() {
        let missing = classifier.classify_response(HttpResponse::<Value>::error(code, None));
        assert!(
            matches!(missing, Outcome::UnknownFailure { cause: OutcomeError::MissingErrorBody }),
            "status {code}"
        );

        let empty = classifier.classify_response(HttpResponse::<Value>::error(code, body("")));
        assert!(
            matches!(empty, Outcome::UnknownFailure { cause: OutcomeError::EmptyErrorBody }),
            "status {code}"
        );
    }
}

#[test]
fn decoder_faults_are_unknown_with_cause() {
    let failing = OutcomeClassifier::<Value>::with_error_decoder(
        |_: ResponseBody| -> Result<Option<Value>, BoxError> { Err("bad shape".into()) },
    );
    let nothing = OutcomeClassifier::<Value>::json();

    for code in [400, 404, 500] {
        match failing.classify_response(HttpResponse::<Value>::error(code, body("{}"))) {
            Outcome::UnknownFailure { cause: OutcomeError::Decode(source) } => {
                assert_eq!(source.to_string(), "bad shape");
            }
            other => panic!("status {code}: expected decode failure, got {other:?}"),
        }

        let outcome = nothing.classify_response(HttpResponse::<Value>::error(code, body("null")));
        assert!(matches!(
            outcome,
            Outcome::UnknownFailure { cause: OutcomeError::NullErrorBody }
        ));
    }
}

#[test]
fn transport_faults_are_network_failures() {
    let classifier = OutcomeClassifier::<Value>::json();
    let kinds = [
        io::ErrorKind::ConnectionRefused,
        io::ErrorKind::ConnectionReset,
        io::ErrorKind::TimedOut,
        io::ErrorKind::NotFound,
        io::ErrorKind::UnexpectedEof,
    ];
    for kind in kinds {
        let failure: BoxError = Box::new(TransportError::new(kind, "wire"));
        match classifier.classify_failure::<Value>(failure) {
            Outcome::NetworkFailure { cause } => {
                assert_eq!(cause.kind(), kind);
                assert_eq!(cause.to_string(), "transport failure: wire");
            }
            other => panic!("{kind:?}: expected NetworkFailure, got {other:?}"),
        }
    }
}

#[test]
fn other_faults_are_unknown_failures() {
    let classifier = OutcomeClassifier::<Value>::json();
    let faults: [BoxError; 3] = [
        Box::new(serde_json::from_str::<Value>("{").unwrap_err()),
        "unexpected state".into(),
        Box::new(std::fmt::Error),
    ];
    for fault in faults {
        let message = fault.to_string();
        match classifier.classify_failure::<Value>(fault) {
            Outcome::UnknownFailure { cause: OutcomeError::Unclassified(source) } => {
                assert_eq!(source.to_string(), message);
            }
            other => panic!("expected UnknownFailure, got {other:?}"),
        }
    }
}

#[test]
fn classification_is_idempotent() {
    let classifier = OutcomeClassifier::<Value>::json();
    let inputs: [fn() -> HttpResponse<Value>; 6] = [
        || HttpResponse::success(200, Some(json!({ "id": 1 }))),
        || HttpResponse::success(204, None),
        || HttpResponse::error(404, body(r#"{"msg":"nf"}"#)),
        || HttpResponse::error(500, body("")),
        || HttpResponse::error(502, None),
        || HttpResponse::error(422, body("<html>")),
    ];
    for make in inputs {
        let first = classifier.classify_response(make());
        let second = classifier.classify_response(make());
        assert_eq!(first, second);
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn scenario_success_with_body() {
    let outcome = OutcomeClassifier::<Value>::json()
        .classify_response(HttpResponse::success(200, Some(json!({ "id": 1 }))));
    assert_eq!(outcome, Outcome::Success { code: 200, body: json!({ "id": 1 }) });
}

#[test]
fn scenario_success_without_body() {
    let outcome =
        OutcomeClassifier::<Value>::json().classify_response(HttpResponse::<Value>::success(200, None));
    assert_eq!(outcome, Outcome::SuccessEmpty { code: 200 });
}

#[test]
fn scenario_not_found_with_error_body() {
    let outcome = OutcomeClassifier::<Value>::json()
        .classify_response(HttpResponse::<Value>::error(404, body(r#"{"msg":"nf"}"#)));
    assert_eq!(outcome, Outcome::Error { code: 404, body: json!({ "msg": "nf" }) });
}

#[test]
fn scenario_not_found_without_decoder() {
    let outcome = OutcomeClassifier::<Value>::new()
        .classify_response(HttpResponse::<Value>::error(404, body(r#"{"msg":"nf"}"#)));
    assert_eq!(outcome, Outcome::ErrorEmpty { code: 404 });
}

#[test]
fn scenario_connection_timeout() {
    let timeout: BoxError = Box::new(io::Error::new(io::ErrorKind::TimedOut, "connect timed out"));
    match OutcomeClassifier::<Value>::json().classify::<Value>(Err(timeout)) {
        Outcome::NetworkFailure { cause } => {
            assert!(cause.is_timeout());
            assert_eq!(cause.get_ref().to_string(), "connect timed out");
        }
        other => panic!("expected NetworkFailure, got {other:?}"),
    }
}

#[test]
fn scenario_server_error_with_empty_body() {
    let outcome = OutcomeClassifier::<Value>::json()
        .classify_response(HttpResponse::<Value>::error(500, body("")));
    match outcome {
        Outcome::UnknownFailure { cause } => assert_eq!(cause.to_string(), "empty error body"),
        other => panic!("expected UnknownFailure, got {other:?}"),
    }
}
