//! Error responses.
//!
//! Every failure reaching a handler is turned into a status code and a
//! JSON body `{"error": <code>, "message": <text>}` here.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::proxy::ProxyError;
use crate::status::{StatusError, StoreError};

/// Handler-level error.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Status(#[from] StatusError),

    #[error(transparent)]
    Proxy(#[from] ProxyError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Status(StatusError::Store(StoreError::Unavailable(_)))
            | ApiError::Status(StatusError::Store(StoreError::Timeout(_))) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ApiError::Status(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Proxy(ProxyError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Proxy(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Status(StatusError::ServiceUnset) => "status_unconfigured",
            ApiError::Status(StatusError::Store(StoreError::NotFound(_))) => "status_record_missing",
            ApiError::Status(StatusError::Store(StoreError::Decode(_))) => "status_record_malformed",
            ApiError::Status(StatusError::Store(_)) => "status_store_unavailable",
            ApiError::Status(StatusError::Encode(_)) => "status_encoding_failed",
            ApiError::Proxy(ProxyError::NotConfigured | ProxyError::InvalidTarget(_)) => {
                "remote_unconfigured"
            }
            ApiError::Proxy(ProxyError::Transport(_)) => "upstream_unavailable",
            ApiError::Proxy(ProxyError::Timeout(_)) => "upstream_timeout",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.code(),
            message: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
