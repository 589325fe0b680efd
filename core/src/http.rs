//! HTTP transport types and the `Transport` seam.
//!
//! # Design
//! Requests and responses are plain data. The core builds an `HttpRequest`
//! and classifies an `HttpResponse` without knowing how bytes move. Hosts
//! either execute the request themselves or hand `WpClient` something that
//! implements `Transport`.
//!
//! All fields use owned types so values can be stored and replayed freely.

use std::time::Duration;

/// Options passed to the transport alongside the URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub headers: Vec<(String, String)>,
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Combine `overlay` into `self`.
    ///
    /// Header lists are merged rather than replaced: an overlay header whose
    /// name matches an existing one (case-insensitive) takes its place, every
    /// other header from either side is kept in order. The overlay timeout
    /// wins when set.
    pub fn merge(mut self, overlay: RequestOptions) -> Self {
        for (name, value) in overlay.headers {
            match self
                .headers
                .iter_mut()
                .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
            {
                Some(slot) => slot.1 = value,
                None => self.headers.push((name, value)),
            }
        }
        if overlay.timeout.is_some() {
            self.timeout = overlay.timeout;
        }
        self
    }

    /// Case-insensitive header lookup.
    pub fn get_header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// A GET request described as plain data.
///
/// Built by `WpClient::build_get_users`. `url` already carries the encoded
/// query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub options: RequestOptions,
}

/// An HTTP response described as plain data.
///
/// `status` is `None` when the host could not determine a status code; such
/// a response is always classified as a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: Option<u16>,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: &str) -> Self {
        Self {
            status: Some(status),
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Case-insensitive header lookup. The first match wins.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, Some(status) if (200..300).contains(&status))
    }
}

/// The transport could not produce a response at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Executes a GET on behalf of the client.
///
/// Implementations must return non-2xx responses as `Ok` so the client can
/// classify them; `Err` is reserved for failures where no response exists.
pub trait Transport {
    fn get(&self, url: &str, options: &RequestOptions) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str, options: &RequestOptions) -> Result<HttpResponse, TransportError> {
        (**self).get(url, options)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn get(&self, url: &str, options: &RequestOptions) -> Result<HttpResponse, TransportError> {
        (**self).get(url, options)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}
