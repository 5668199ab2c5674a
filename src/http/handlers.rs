//! Route handlers for `GET /` and `GET /service`.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
};

use crate::http::request::{request_id, request_id_value};
use crate::http::response::ApiError;
use crate::http::server::AppState;

/// Self-description of the instance.
pub async fn status_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let body = state.status.resolve(&state.identity).await.map_err(|e| {
        tracing::error!(request_id = %request_id(&headers), error = %e, "Status lookup failed");
        ApiError::from(e)
    })?;

    Ok((
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        body,
    )
        .into_response())
}

/// Relay the remote's body verbatim. The outer status is always 200.
pub async fn proxy_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let request_id = request_id(&headers);

    let reply = state
        .remote
        .fetch(request_id_value(&headers))
        .await
        .map_err(|e| {
            tracing::error!(request_id = %request_id, error = %e, "Upstream error");
            ApiError::from(e)
        })?;

    if !reply.status.is_success() {
        tracing::warn!(
            request_id = %request_id,
            status = %reply.status,
            "Remote returned non-success status; relaying body"
        );
    }

    let mut response = Response::new(Body::from(reply.body));
    if let Some(content_type) = reply.content_type {
        response.headers_mut().insert(header::CONTENT_TYPE, content_type);
    }
    Ok(response)
}
