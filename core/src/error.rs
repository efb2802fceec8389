//! Error types for the fetch helper.
//!
//! # Design
//! Two layers. `FetchError` classifies what went wrong inside the pipeline
//! and is propagated with `?`. `ApiError` is the descriptor callers receive:
//! every `FetchError` collapses into it at the `fetch_data` boundary with no
//! status, while non-2xx responses produce one with the status populated.

use std::error::Error as StdError;

use serde::{Deserialize, Serialize};

use crate::transport::TransportError;

/// Message used when a failure carries no text of its own.
pub const FALLBACK_MESSAGE: &str = "Unknown error occurred";

/// Failures raised while building, sending, or decoding a request.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request URL could not be resolved against the client's base URL.
    #[error("{0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The transport could not complete the round-trip.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A 2xx body was not valid JSON for the expected type.
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
}

/// The error descriptor returned in place of a payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ApiError {
    /// Descriptor for a response whose status is outside the 2xx range.
    pub fn http(status: u16, status_text: &str) -> Self {
        Self {
            message: Some(format!("HTTP error: {status_text}")),
            status: Some(status),
        }
    }

    /// Descriptor for any failure that produced no HTTP status.
    pub fn from_failure(err: &(dyn StdError + 'static)) -> Self {
        let message = err.to_string();
        Self {
            message: Some(if message.is_empty() {
                FALLBACK_MESSAGE.to_string()
            } else {
                message
            }),
            status: None,
        }
    }
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        ApiError::from_failure(&err)
    }
}
