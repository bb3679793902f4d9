//! HTTP exchange types shared by transports and the classifier.
//!
//! # Design
//! Requests are plain data so any transport can execute them. A completed
//! exchange is described by `HttpResponse<S>`: the status, the headers, the
//! success body already decoded by the transport (if any) and the raw error
//! body as a read-once `ResponseBody`. The classifier only ever looks at this
//! structural view, never at a concrete HTTP client type.

use std::fmt;
use std::io::{self, Cursor, Read};

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// A raw response body that can be read exactly once.
///
/// The reported length is `None` when the transport could not tell (e.g.
/// chunked encoding). Reading consumes the value, so a body can never be
/// handed to two decoders.
pub struct ResponseBody {
    content_length: Option<u64>,
    content_type: Option<String>,
    reader: Box<dyn Read + Send>,
}

impl ResponseBody {
    /// Body backed by an in-memory buffer; its length is known.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes = bytes.into();
        Self {
            content_length: Some(bytes.len() as u64),
            content_type: None,
            reader: Box::new(Cursor::new(bytes)),
        }
    }

    /// Body backed by a stream with an optionally known length.
    pub fn from_reader<R>(reader: R, content_length: Option<u64>) -> Self
    where
        R: Read + Send + 'static,
    {
        Self {
            content_length,
            content_type: None,
            reader: Box::new(reader),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// True only when the length is known to be zero.
    pub fn is_empty(&self) -> bool {
        self.content_length == Some(0)
    }

    /// Drain the stream into memory.
    pub fn into_bytes(mut self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.reader.read_to_end(&mut buf)?;
        Ok(buf)
    }
}

impl Read for ResponseBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseBody")
            .field("content_length", &self.content_length)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

/// The structural view of a completed exchange.
///
/// `body` holds the success body when the transport decoded one; for
/// non-2xx statuses the transport leaves it empty and fills `error_body`
/// with the raw payload instead.
#[derive(Debug)]
pub struct HttpResponse<S> {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Option<S>,
    pub error_body: Option<ResponseBody>,
}

impl<S> HttpResponse<S> {
    /// A 2xx response with an optional decoded body.
    pub fn success(status: u16, body: Option<S>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body,
            error_body: None,
        }
    }

    /// A non-2xx response with an optional raw error body.
    pub fn error(status: u16, error_body: Option<ResponseBody>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: None,
            error_body,
        }
    }

    pub fn with_headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers = headers;
        self
    }

    /// True iff the status is in `[200, 300)`.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}
