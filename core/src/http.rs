//! HTTP transport seam for the ticketing client.
//!
//! # Design
//! Requests and responses are plain data with owned fields, so transport
//! adapters and test doubles stay trivial to write. The library builds an
//! `HttpRequest`, hands it to the configured [`Transport`], and interprets
//! the `HttpResponse` itself: a non-200 status is data to classify, not a
//! transport failure. Query-parameter encoding is the adapter's job.

use thiserror::Error;

/// HTTP method for a request. The remote service only ever needs these two:
/// list-style reads ride on GET query params, everything else POSTs a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// An HTTP request described as plain data.
///
/// Built by the envelope; the transport is responsible for executing it and
/// returning the corresponding [`HttpResponse`].
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub endpoint: String,
    /// Query parameters, always including the `controller`/`action` pair
    /// that routes the call on the remote side.
    pub params: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// A failure below the HTTP layer: connection refused, DNS, timeout.
///
/// Responses that carry a status code are never a `TransportError`; they
/// come back as an [`HttpResponse`] for the client to classify.
#[derive(Debug, Error)]
#[error("transport failure: {0}")]
pub struct TransportError(pub String);

/// Executes one HTTP round trip.
///
/// Implementations own timeouts and connection handling. The client issues
/// exactly one `execute` per operation and never retries.
pub trait Transport: Send + Sync {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}
