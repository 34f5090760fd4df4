//! HTTP transport for the proxy control service
//!
//! One `Transport` talks to one configurable base URL. It builds the request
//! URL, hands the request to an `HttpBackend`, and classifies the answer:
//!
//! - 2xx: the body is returned, decoded as JSON or kept as raw bytes at the
//!   caller's choice
//! - anything else: `TransportError::HttpStatus`, with the message taken from
//!   the body's `error` field when the body is JSON and has one, and derived
//!   from the status code otherwise
//!
//! The backend is a trait so the production client (`ReqwestBackend`) can be
//! swapped for an in-memory one in tests.

mod http;
#[cfg(test)]
pub(crate) mod testing;

use std::fmt;

use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{ProxyctlError, TransportError};

pub use http::ReqwestBackend;

/// HTTP methods used by the control service API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// A request relative to the transport's base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Append a query parameter
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add a request header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set a raw request body
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set a JSON request body and the matching content type
    pub fn json<T: serde::Serialize>(self, value: &T) -> Result<Self, ProxyctlError> {
        let body = serde_json::to_vec(value)
            .map_err(|e| ProxyctlError::Json(format!("Failed to encode request body: {}", e)))?;
        Ok(self.header("Content-Type", "application/json").body(body))
    }
}

/// Status and body as received, before classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs a single HTTP exchange
///
/// Implementations report only network-level failures; status
/// classification is done by `Transport`.
pub trait HttpBackend {
    fn execute(&self, url: &Url, request: &Request) -> Result<RawResponse, TransportError>;
}

/// A successful (2xx) response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    body: Vec<u8>,
}

impl Response {
    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, TransportError> {
        serde_json::from_slice(&self.body).map_err(|e| {
            TransportError::Decode(format!("Invalid JSON in response body: {}", e))
        })
    }

    /// Keep the body as raw bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.body
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for the control service rooted at a base URL
pub struct Transport<B = ReqwestBackend> {
    base_url: String,
    base: Url,
    backend: B,
}

impl<B: HttpBackend> Transport<B> {
    /// Create a transport for `base_url`
    ///
    /// The base may carry a path prefix (`http://host/api`); request paths
    /// are appended to it.
    pub fn new(base_url: &str, backend: B) -> Result<Self, ProxyctlError> {
        let base_url = normalize_base_url(base_url)?;
        let base = Url::parse(&base_url).map_err(|e| {
            ProxyctlError::Config(format!("Invalid base URL '{}': {}", base_url, e))
        })?;
        Ok(Self {
            base_url,
            base,
            backend,
        })
    }

    /// Base URL requests are sent against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The backend requests are sent through
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Full URL for a request
    ///
    /// Path segments are appended to the base path one by one and
    /// percent-encoded, so a segment can never spill into the query.
    pub fn url_for(&self, request: &Request) -> Url {
        let mut url = self.base.clone();
        // The base is checked to be a hierarchical URL in `new`
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(request.path.split('/').filter(|s| !s.is_empty()));
        }
        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &request.query {
                pairs.append_pair(key, value);
            }
        }
        url
    }

    /// Send a request and classify the response
    pub fn request(&self, request: Request) -> Result<Response, TransportError> {
        let url = self.url_for(&request);
        let raw = self.backend.execute(&url, &request).map_err(|err| {
            tracing::debug!(method = %request.method, %url, error = %err, "request failed");
            err
        })?;
        tracing::debug!(method = %request.method, %url, status = raw.status, "response received");
        classify(raw)
    }

    /// Send a request and decode the JSON response body
    pub fn request_json<T: DeserializeOwned>(&self, request: Request) -> Result<T, TransportError> {
        self.request(request)?.json()
    }

    /// Send a request and keep the response body as bytes
    pub fn request_bytes(&self, request: Request) -> Result<Vec<u8>, TransportError> {
        Ok(self.request(request)?.into_bytes())
    }
}

/// Check that `base_url` is an http(s) URL and strip any trailing slash
pub fn normalize_base_url(base_url: &str) -> Result<String, ProxyctlError> {
    let trimmed = base_url.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed).map_err(|e| {
        ProxyctlError::Config(format!("Invalid base URL '{}': {}", base_url, e))
    })?;
    if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
        return Err(ProxyctlError::Config(format!(
            "Base URL must be an http(s) URL, got '{}'",
            base_url
        )));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(ProxyctlError::Config(format!(
            "Base URL cannot carry a query or fragment, got '{}'",
            base_url
        )));
    }
    Ok(trimmed.to_string())
}

/// Turn a raw response into a `Response` or an `HttpStatus` error
pub fn classify(raw: RawResponse) -> Result<Response, TransportError> {
    if raw.is_success() {
        return Ok(Response { body: raw.body });
    }

    let message = match serde_json::from_slice::<ErrorBody>(&raw.body) {
        Ok(body) => body.error,
        Err(_) => status_reason(raw.status),
    };

    Err(TransportError::HttpStatus {
        code: raw.status,
        message,
    })
}

fn status_reason(code: u16) -> String {
    reqwest::StatusCode::from_u16(code)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or("request failed")
        .to_string()
}
