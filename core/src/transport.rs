//! The network primitive `FetchClient` sends requests through.
//!
//! # Design
//! `Transport` is the only I/O seam in the crate. `UreqTransport` is the
//! production implementation; tests substitute doubles that record the
//! request and replay a canned `HttpResponse` or failure.

use tracing::trace;

use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// A transport-level failure: nothing usable came back.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error(transparent)]
    Ureq(#[from] ureq::Error),

    /// Failure reported by a non-ureq transport.
    #[error("{0}")]
    Other(String),
}

/// Executes one HTTP round-trip.
///
/// Implementations must return non-2xx responses as `Ok` data; only failures
/// to obtain a response at all are `Err`.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a `ureq` agent.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        // Status codes are interpreted by the client, not the agent.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request.url.as_str();
        let headers = request.headers.as_slice();

        let mut response = match request.method {
            HttpMethod::Get => with_headers(self.agent.get(url), headers).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(url), headers).call(),
            HttpMethod::Post => with_headers(self.agent.post(url), headers).send_empty(),
            HttpMethod::Put => with_headers(self.agent.put(url), headers).send_empty(),
        }?;

        let status = response.status();
        trace!(status = status.as_u16(), "ureq response headers received");
        let body = response.body_mut().with_config().limit(u64::MAX);
        let body = if status.is_success() {
            body.read_to_string()?
        } else {
            // Error bodies are never decoded; an unreadable one must not hide the status.
            body.read_to_vec()
                .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
                .unwrap_or_default()
        };

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: reason_phrase(status),
            body,
        })
    }
}

/// Canonical reason for `status`, or the bare code when it has none.
fn reason_phrase(status: ureq::http::StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
