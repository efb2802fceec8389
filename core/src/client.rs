//! The request executor.
//!
//! # Design
//! `FetchClient` holds a transport and an optional base URL, nothing else.
//! `fetch_data` is a linear pipeline (`build_request` -> `Transport::execute`
//! -> `parse_response`) wrapped in one error boundary: whatever fails inside
//! it becomes an `ApiError` without a status. A non-2xx response is the only
//! path that yields a status. `build_request` and `parse_response` are public
//! so callers that run their own I/O can use the same URL and status rules.

use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::config::FetchConfig;
use crate::error::{ApiError, FetchError};
use crate::http::{HttpRequest, HttpResponse};
use crate::query::build_url;
use crate::response::ApiResponse;
use crate::transport::{Transport, UreqTransport};

/// Issues JSON requests through a `Transport` and normalizes the outcome.
#[derive(Debug, Clone, Default)]
pub struct FetchClient<R = UreqTransport> {
    base_url: Option<String>,
    transport: R,
}

impl FetchClient<UreqTransport> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: Transport> FetchClient<R> {
    pub fn with_transport(transport: R) -> Self {
        Self {
            base_url: None,
            transport,
        }
    }

    /// Resolve relative request URLs against `base_url`.
    ///
    /// The base is parsed per request; an invalid base surfaces as an error
    /// descriptor from `fetch_data`.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.to_string());
        self
    }

    /// Resolve the final URL and collect headers for `config`.
    pub fn build_request(&self, url: &str, config: &FetchConfig) -> Result<HttpRequest, FetchError> {
        let url = build_url(url, config.query_params.as_ref());
        let url = match &self.base_url {
            Some(base) => Url::parse(base)?.join(&url)?.to_string(),
            None => url,
        };
        let headers = config
            .headers
            .iter()
            .flatten()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        Ok(HttpRequest {
            method: config.method,
            url,
            headers,
        })
    }

    /// Turn a transport response into a payload or an error descriptor.
    pub fn parse_response<T: DeserializeOwned>(&self, response: &HttpResponse) -> ApiResponse<T> {
        match interpret(response) {
            Ok(outcome) => outcome.into(),
            Err(err) => ApiResponse::Error(err.into()),
        }
    }

    /// Send one request and decode a JSON payload of type `T`.
    ///
    /// Never fails: every failure is returned as `ApiResponse::Error`.
    pub fn fetch_data<T: DeserializeOwned>(&self, url: &str, config: &FetchConfig) -> ApiResponse<T> {
        match self.round_trip(url, config) {
            Ok(Ok(data)) => ApiResponse::Data(data),
            Ok(Err(err)) => {
                warn!(url, status = err.status, "request returned an error status");
                ApiResponse::Error(err)
            }
            Err(err) => {
                warn!(url, error = %err, "request failed");
                ApiResponse::Error(err.into())
            }
        }
    }

    fn round_trip<T: DeserializeOwned>(
        &self,
        url: &str,
        config: &FetchConfig,
    ) -> Result<Result<T, ApiError>, FetchError> {
        let request = self.build_request(url, config)?;
        debug!(method = %request.method, url = %request.url, "sending request");
        let response = self.transport.execute(&request)?;
        debug!(status = response.status, "received response");
        interpret(&response)
    }
}

/// The outer `Err` is a pipeline failure; the inner one an HTTP status error.
fn interpret<T: DeserializeOwned>(response: &HttpResponse) -> Result<Result<T, ApiError>, FetchError> {
    if !response.is_ok() {
        return Ok(Err(ApiError::http(response.status, &response.status_text)));
    }
    Ok(Ok(serde_json::from_str(&response.body)?))
}

/// Send a request with a default client.
pub fn fetch_data<T: DeserializeOwned>(url: &str, config: &FetchConfig) -> ApiResponse<T> {
    FetchClient::new().fetch_data(url, config)
}
