//! The transport-facing call abstraction and its classified wrapper.
//!
//! # Design
//! `Call` is the seam a transport implements: one exchange that can run
//! blocking (`execute`) or in the background (`enqueue`). `OutcomeCall`
//! wraps any `Call` and routes every completion, whichever mode produced it,
//! through the same `OutcomeClassifier`, so callers receive a
//! `ResponseOutcome` instead of a `Result`. Cancellation, duplication and the
//! timeout are passed through untouched.

use std::time::Duration;

use tokio::sync::oneshot;

use crate::classifier::OutcomeClassifier;
use crate::error::{BoxError, OutcomeError};
use crate::http::{HttpRequest, HttpResponse};
use crate::outcome::ResponseOutcome;

/// Result of one exchange as reported by a transport.
pub type CallResult<S> = Result<HttpResponse<S>, BoxError>;

/// Completion callback for `Call::enqueue`. Invoked exactly once.
pub type Callback<S> = Box<dyn FnOnce(CallResult<S>) + Send + 'static>;

/// A single HTTP exchange issued through some transport.
///
/// Implementations run the exchange at most once; `duplicate` yields a fresh
/// call for the same request.
pub trait Call: Send + Sync {
    type Body: Send + 'static;

    /// Run the exchange on the current thread.
    fn execute(&self) -> CallResult<Self::Body>;

    /// Run the exchange in the background and report through `callback`.
    fn enqueue(&self, callback: Callback<Self::Body>);

    /// A new, unexecuted call for the same request.
    fn duplicate(&self) -> Self
    where
        Self: Sized;

    fn cancel(&self);

    fn is_canceled(&self) -> bool;

    fn is_executed(&self) -> bool;

    fn request(&self) -> &HttpRequest;

    /// Timeout applied to the whole exchange, if any.
    fn timeout(&self) -> Option<Duration>;
}

/// Adapter from any `Call` into an `OutcomeCall`.
pub trait CallExt: Call + Sized {
    fn classified<E>(self, classifier: OutcomeClassifier<E>) -> OutcomeCall<Self, E>
    where
        E: Send + 'static,
    {
        OutcomeCall::new(self, classifier)
    }
}

impl<C: Call> CallExt for C {}

/// A call whose result is always a `ResponseOutcome`.
#[derive(Debug)]
pub struct OutcomeCall<C, E> {
    delegate: C,
    classifier: OutcomeClassifier<E>,
}

impl<C, E> OutcomeCall<C, E>
where
    C: Call,
    E: Send + 'static,
{
    pub fn new(delegate: C, classifier: OutcomeClassifier<E>) -> Self {
        Self {
            delegate,
            classifier,
        }
    }

    /// Run the exchange on the current thread and classify it.
    pub fn execute(&self) -> ResponseOutcome<C::Body, E> {
        self.classifier.classify(self.delegate.execute())
    }

    /// Run the exchange in the background; `callback` receives the outcome.
    pub fn enqueue<F>(&self, callback: F)
    where
        F: FnOnce(ResponseOutcome<C::Body, E>) + Send + 'static,
    {
        let classifier = self.classifier.clone();
        self.delegate
            .enqueue(Box::new(move |result: CallResult<C::Body>| callback(classifier.classify(result))));
    }

    /// Await the outcome without blocking the async runtime.
    pub async fn send(&self) -> ResponseOutcome<C::Body, E> {
        let (tx, rx) = oneshot::channel();
        self.enqueue(move |outcome| {
            let _ = tx.send(outcome);
        });
        rx.await.unwrap_or_else(|_| ResponseOutcome::UnknownFailure {
            cause: OutcomeError::unclassified("call dropped without completing"),
        })
    }

    /// A new, unexecuted call sharing this call's classifier.
    pub fn duplicate(&self) -> Self {
        Self {
            delegate: self.delegate.duplicate(),
            classifier: self.classifier.clone(),
        }
    }

    pub fn cancel(&self) {
        self.delegate.cancel();
    }

    pub fn is_canceled(&self) -> bool {
        self.delegate.is_canceled()
    }

    pub fn is_executed(&self) -> bool {
        self.delegate.is_executed()
    }

    pub fn request(&self) -> &HttpRequest {
        self.delegate.request()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.delegate.timeout()
    }

    pub fn into_inner(self) -> C {
        self.delegate
    }
}
