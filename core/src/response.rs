//! The outcome of a `fetch_data` call.

use serde::Serialize;

use crate::error::ApiError;

/// Either the decoded payload or an error descriptor, never both.
///
/// `T` is whatever the caller asked `serde` to decode; no shape validation
/// happens beyond that. Serializes as `{"data": ...}` or `{"error": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiResponse<T> {
    Data(T),
    Error(ApiError),
}

impl<T> ApiResponse<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, ApiResponse::Data(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ApiResponse::Data(data) => Some(data),
            ApiResponse::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            ApiResponse::Data(_) => None,
            ApiResponse::Error(err) => Some(err),
        }
    }

    pub fn into_result(self) -> Result<T, ApiError> {
        match self {
            ApiResponse::Data(data) => Ok(data),
            ApiResponse::Error(err) => Err(err),
        }
    }
}

impl<T> From<Result<T, ApiError>> for ApiResponse<T> {
    fn from(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(data) => ApiResponse::Data(data),
            Err(err) => ApiResponse::Error(err),
        }
    }
}
