//! Generic JSON request helper over a pluggable HTTP transport.
//!
//! # Overview
//! `fetch_data` builds the final URL from a base URL and query parameters,
//! sends one request with the configured method and headers, and returns an
//! `ApiResponse`: the decoded payload, or an `ApiError` describing either an
//! HTTP status failure (status present) or any other failure (status absent).
//!
//! # Design
//! - `FetchClient` is stateless apart from its `Transport` and optional base
//!   URL; concurrent calls share nothing mutable.
//! - The network primitive sits behind the `Transport` trait. `UreqTransport`
//!   is the default; tests swap in recording doubles.
//! - No retries, timeouts, caching, or payload validation. The caller's
//!   `DeserializeOwned` type is the only shape check.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod query;
pub mod response;
pub mod transport;

pub use client::{fetch_data, FetchClient};
pub use config::{FetchConfig, Headers, QueryParams, QueryValue};
pub use error::{ApiError, FetchError, FALLBACK_MESSAGE};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use response::ApiResponse;
pub use transport::{Transport, TransportError, UreqTransport};
