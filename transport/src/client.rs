//! Blocking HTTP transport for `outcome-core` built on ureq.
//!
//! # Design
//! `HttpClient` owns a configured `ureq::Agent` and hands out one `UreqCall`
//! per request. A call runs its exchange at most once, either on the calling
//! thread (`execute`) or on a spawned thread (`enqueue`), and reports a
//! structural `HttpResponse` whatever the status: ureq's status-as-error
//! behavior is disabled so that status interpretation stays with the
//! classifier. 2xx bodies are decoded here with the call's `BodyDecoder`;
//! non-2xx bodies are handed on raw.
//!
//! ureq has no way to abort a request that is already on the wire. An
//! enqueued call therefore parks its callback where `cancel` can reach it:
//! whichever of completion or cancel comes first takes the callback, and the
//! background exchange finishes on its own with its result dropped. A
//! blocking `execute` cannot be interrupted and is bounded only by the
//! configured timeout.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use outcome_core::{
    BodyDecoder, BoxError, Call, CallResult, Callback, HttpMethod, HttpRequest, HttpResponse,
    JsonDecoder, ResponseBody, TransportError,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use ureq::Agent;

use crate::config::ClientConfig;
use crate::error::{map_ureq_error, ClientError};

/// Factory for calls against one base URL.
#[derive(Clone)]
pub struct HttpClient {
    agent: Agent,
    config: ClientConfig,
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    pub fn new(config: ClientConfig) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(config.timeout())
            .build()
            .new_agent();
        Self { agent, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Absolute URL for `path` under the configured base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url(), path.trim_start_matches('/'))
    }

    pub fn get(&self, path: &str) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, self.url(path))
    }

    pub fn delete(&self, path: &str) -> HttpRequest {
        HttpRequest::new(HttpMethod::Delete, self.url(path))
    }

    pub fn post_json<T: Serialize>(&self, path: &str, body: &T) -> Result<HttpRequest, ClientError> {
        let body = serde_json::to_string(body)?;
        Ok(HttpRequest::new(HttpMethod::Post, self.url(path))
            .with_header("content-type", "application/json")
            .with_body(body))
    }

    pub fn put_json<T: Serialize>(&self, path: &str, body: &T) -> Result<HttpRequest, ClientError> {
        let body = serde_json::to_string(body)?;
        Ok(HttpRequest::new(HttpMethod::Put, self.url(path))
            .with_header("content-type", "application/json")
            .with_body(body))
    }

    /// A call whose 2xx body is decoded as JSON into `S`.
    pub fn call<S>(&self, request: HttpRequest) -> UreqCall<S>
    where
        S: DeserializeOwned + Send + 'static,
    {
        self.call_with(request, JsonDecoder::<S>::new())
    }

    /// A call whose 2xx body is decoded by `decoder`.
    pub fn call_with<S, D>(&self, request: HttpRequest, decoder: D) -> UreqCall<S>
    where
        S: Send + 'static,
        D: BodyDecoder<S> + 'static,
    {
        UreqCall {
            exchange: Exchange {
                agent: self.agent.clone(),
                request,
                decoder: Arc::new(decoder),
                state: Arc::new(CallState::default()),
            },
            pending: Arc::new(Mutex::new(None)),
            timeout: self.config.timeout(),
        }
    }
}

#[derive(Debug, Default)]
struct CallState {
    executed: AtomicBool,
    canceled: AtomicBool,
}

/// Everything a background thread needs to run the exchange.
struct Exchange<S> {
    agent: Agent,
    request: HttpRequest,
    decoder: Arc<dyn BodyDecoder<S>>,
    state: Arc<CallState>,
}

impl<S> Clone for Exchange<S> {
    fn clone(&self) -> Self {
        Self {
            agent: self.agent.clone(),
            request: self.request.clone(),
            decoder: Arc::clone(&self.decoder),
            state: Arc::clone(&self.state),
        }
    }
}

impl<S> Exchange<S> {
    fn run(&self) -> CallResult<S> {
        self.begin()?;
        self.finish()
    }

    /// Mark the call executed, then refuse to go on if it was canceled.
    fn begin(&self) -> Result<(), BoxError> {
        if self.state.executed.swap(true, Ordering::SeqCst) {
            return Err(Box::new(ClientError::AlreadyExecuted));
        }
        if self.state.canceled.load(Ordering::SeqCst) {
            return Err(Box::new(TransportError::canceled()));
        }
        Ok(())
    }

    fn finish(&self) -> CallResult<S> {
        debug!(method = %self.request.method, url = %self.request.url, "sending request");
        let result = self.send();

        // A cancel that lands mid-flight still wins over whatever came back.
        if self.state.canceled.load(Ordering::SeqCst) {
            return Err(Box::new(TransportError::canceled()));
        }
        result
    }

    fn send(&self) -> CallResult<S> {
        let request = &self.request;
        let url = request.url.as_str();
        let headers = request.headers.as_slice();

        let mut response = match request.method {
            HttpMethod::Get => with_headers(self.agent.get(url), headers).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(url), headers).call(),
            HttpMethod::Post => match request.body.as_deref() {
                Some(body) => with_headers(self.agent.post(url), headers).send(body.as_bytes()),
                None => with_headers(self.agent.post(url), headers).send_empty(),
            },
            HttpMethod::Put => match request.body.as_deref() {
                Some(body) => with_headers(self.agent.put(url), headers).send(body.as_bytes()),
                None => with_headers(self.agent.put(url), headers).send_empty(),
            },
        }
        .map_err(map_ureq_error)?;

        let status = response.status().as_u16();
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let bytes = response.body_mut().read_to_vec().map_err(map_ureq_error)?;
        debug!(status, len = bytes.len(), "received response");

        structure(status, headers, bytes, self.decoder.as_ref())
    }
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
    for (key, value) in headers {
        builder = builder.header(key.as_str(), value.as_str());
    }
    builder
}

/// Build the structural response from raw parts.
///
/// 2xx bodies go through `decoder`; an empty body, or a 204/205 status,
/// yields no body at all. Non-2xx bodies are kept raw for the classifier.
fn structure<S>(
    status: u16,
    headers: Vec<(String, String)>,
    bytes: Vec<u8>,
    decoder: &dyn BodyDecoder<S>,
) -> CallResult<S> {
    let content_type = headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("content-type"))
        .map(|(_, value)| value.clone());
    let mut body = ResponseBody::from_bytes(bytes);
    if let Some(content_type) = content_type {
        body = body.with_content_type(content_type);
    }

    let response = if (200..300).contains(&status) {
        let decoded = if status == 204 || status == 205 || body.is_empty() {
            None
        } else {
            decoder.decode(body)?
        };
        HttpResponse::success(status, decoded)
    } else {
        HttpResponse::error(status, Some(body))
    };
    Ok(response.with_headers(headers))
}

/// Callback of an enqueued call, held until completion or cancel claims it.
type Pending<S> = Arc<Mutex<Option<Callback<S>>>>;

fn take_pending<S>(pending: &Pending<S>) -> Option<Callback<S>> {
    pending.lock().unwrap_or_else(PoisonError::into_inner).take()
}

/// One exchange over ureq. Implements `Call`.
///
/// `cancel` on an enqueued call completes its callback right away with a
/// canceled `TransportError`; it does not interrupt a blocking `execute`.
pub struct UreqCall<S> {
    exchange: Exchange<S>,
    pending: Pending<S>,
    timeout: Option<Duration>,
}

impl<S: Send + 'static> Call for UreqCall<S> {
    type Body = S;

    fn execute(&self) -> CallResult<S> {
        self.exchange.run()
    }

    fn enqueue(&self, callback: Callback<S>) {
        if let Err(err) = self.exchange.begin() {
            callback(Err(err));
            return;
        }
        *self.pending.lock().unwrap_or_else(PoisonError::into_inner) = Some(callback);

        let exchange = self.exchange.clone();
        let pending = Arc::clone(&self.pending);
        std::thread::spawn(move || {
            let result = exchange.finish();
            match take_pending(&pending) {
                Some(callback) => callback(result),
                None => debug!(url = %exchange.request.url, "dropping result of canceled call"),
            }
        });
    }

    fn duplicate(&self) -> Self {
        Self {
            exchange: Exchange {
                state: Arc::new(CallState::default()),
                ..self.exchange.clone()
            },
            pending: Arc::new(Mutex::new(None)),
            timeout: self.timeout,
        }
    }

    fn cancel(&self) {
        self.exchange.state.canceled.store(true, Ordering::SeqCst);
        if let Some(callback) = take_pending(&self.pending) {
            callback(Err(Box::new(TransportError::canceled())));
        }
    }

    fn is_canceled(&self) -> bool {
        self.exchange.state.canceled.load(Ordering::SeqCst)
    }

    fn is_executed(&self) -> bool {
        self.exchange.state.executed.load(Ordering::SeqCst)
    }

    fn request(&self) -> &HttpRequest {
        &self.exchange.request
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}
