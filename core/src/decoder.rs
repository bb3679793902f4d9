//! Pluggable body decoders.
//!
//! # Design
//! A decoder turns a raw `ResponseBody` into a typed value. `Ok(None)` means
//! "decoded to nothing", which the classifier treats differently from a
//! decode fault. The same trait serves success bodies (used by transports)
//! and error bodies (used by the classifier).

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::error::BoxError;
use crate::http::ResponseBody;

/// Converts a read-once body into a typed value.
pub trait BodyDecoder<T>: Send + Sync {
    fn decode(&self, body: ResponseBody) -> Result<Option<T>, BoxError>;
}

impl<T, F> BodyDecoder<T> for F
where
    F: Fn(ResponseBody) -> Result<Option<T>, BoxError> + Send + Sync,
{
    fn decode(&self, body: ResponseBody) -> Result<Option<T>, BoxError> {
        self(body)
    }
}

/// Decodes JSON bodies with `serde_json`. A literal `null` decodes to `None`.
pub struct JsonDecoder<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonDecoder<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for JsonDecoder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for JsonDecoder<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for JsonDecoder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JsonDecoder<{}>", std::any::type_name::<T>())
    }
}

impl<T: DeserializeOwned> BodyDecoder<T> for JsonDecoder<T> {
    fn decode(&self, body: ResponseBody) -> Result<Option<T>, BoxError> {
        let value: Option<T> = serde_json::from_reader(body)?;
        Ok(value)
    }
}

/// Ignores the body entirely. For callers with no interest in its contents.
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl<T> BodyDecoder<T> for Discard {
    fn decode(&self, _body: ResponseBody) -> Result<Option<T>, BoxError> {
        Ok(None)
    }
}
