use std::fmt::Debug;
use std::sync::mpsc;

use outcome_core::{CallExt, Discard, OutcomeClassifier, ResponseOutcome};
use outcome_ureq::{ClientConfig, HttpClient};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Item {
    id: u64,
    name: String,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct ApiError {
    msg: String,
}

fn report<S: Debug, E: Debug>(label: &str, outcome: ResponseOutcome<S, E>) {
    match outcome {
        ResponseOutcome::Success { code, body } => info!("{label}: Success[{code}] {body:?}"),
        ResponseOutcome::SuccessEmpty { code } => info!("{label}: SuccessEmpty[{code}]"),
        ResponseOutcome::Error { code, body } => info!("{label}: Error[{code}] {body:?}"),
        ResponseOutcome::ErrorEmpty { code } => info!("{label}: ErrorEmpty[{code}]"),
        ResponseOutcome::NetworkFailure { cause } => info!("{label}: NetworkFailure: {cause}"),
        ResponseOutcome::UnknownFailure { cause } => info!("{label}: UnknownFailure: {cause}"),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ClientConfig::default();
    info!("calling {}", config.base_url());
    let client = HttpClient::new(config);

    let success = client
        .call::<Item>(client.get("success"))
        .classified(OutcomeClassifier::<ApiError>::json());
    report("success", success.execute());

    let error = client
        .call::<Item>(client.get("error"))
        .classified(OutcomeClassifier::<ApiError>::json());
    report("error", error.execute());

    let success_ignored = client
        .call_with::<(), _>(client.get("success"), Discard)
        .classified(OutcomeClassifier::<ApiError>::json());
    report("success (body ignored)", success_ignored.execute());

    // Callback mode.
    let error_ignored = client
        .call::<Item>(client.get("error"))
        .classified(OutcomeClassifier::<()>::new());
    let (tx, rx) = mpsc::channel();
    error_ignored.enqueue(move |outcome| {
        let _ = tx.send(outcome);
    });
    match rx.recv() {
        Ok(outcome) => report("error (body ignored)", outcome),
        Err(_) => info!("error (body ignored): callback never fired"),
    }
}
