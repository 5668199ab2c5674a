//! Outbound client for the remote service.
//!
//! # Responsibilities
//! - Build the fixed target URI `http://{remote}:{port}/` once
//! - Issue GET requests through a shared hyper-util client
//! - Buffer the full body and return it untouched
//! - Bound the whole call (connect, headers, body) with a deadline

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderValue, Method, Request, StatusCode, Uri},
};
use hyper::{body::Incoming, Response};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use std::time::Duration;
use thiserror::Error;
use tokio::time;

use crate::config::RemoteConfig;
use crate::http::X_REQUEST_ID;

/// Errors contacting the remote service.
#[derive(Debug, Clone, Error)]
pub enum ProxyError {
    /// `REMOTE_SERVICE` is unset.
    #[error("remote service is not configured")]
    NotConfigured,

    /// Remote name/port do not form a valid URI.
    #[error("invalid remote target '{0}'")]
    InvalidTarget(String),

    /// DNS failure, connection refused/reset, or body read failure.
    #[error("upstream request failed: {0}")]
    Transport(String),

    /// No complete response within the deadline.
    #[error("upstream timed out after {0} ms")]
    Timeout(u64),
}

/// Buffered reply from the remote.
#[derive(Debug, Clone)]
pub struct RemoteReply {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

impl RemoteReply {
    /// Buffer an upstream response. The body is kept byte-for-byte.
    async fn read(response: Response<Incoming>) -> Result<Self, ProxyError> {
        let (parts, body) = response.into_parts();
        let body = axum::body::to_bytes(Body::new(body), usize::MAX)
            .await
            .map_err(|e| ProxyError::Transport(e.to_string()))?;

        Ok(Self {
            status: parts.status,
            content_type: parts.headers.get(header::CONTENT_TYPE).cloned(),
            body,
        })
    }
}

/// Client for the configured remote peer.
#[derive(Clone)]
pub struct RemoteClient {
    client: Client<HttpConnector, Body>,
    target: Result<Uri, ProxyError>,
    timeout_duration: Duration,
}

impl RemoteClient {
    pub fn new(config: &RemoteConfig) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        Self {
            client,
            target: target_uri(config),
            timeout_duration: Duration::from_millis(config.timeout_ms),
        }
    }

    /// The URI every proxied request goes to, if configured.
    pub fn target(&self) -> Option<&Uri> {
        self.target.as_ref().ok()
    }

    /// GET the remote root and buffer the reply.
    pub async fn fetch(&self, request_id: Option<&HeaderValue>) -> Result<RemoteReply, ProxyError> {
        let uri = self.target.clone()?;

        let mut builder = Request::builder()
            .method(Method::GET)
            .uri(uri.clone())
            .header(header::USER_AGENT, concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));
        if let Some(id) = request_id {
            builder = builder.header(X_REQUEST_ID, id.clone());
        }
        let request = builder
            .body(Body::empty())
            .map_err(|e| ProxyError::InvalidTarget(e.to_string()))?;

        let call = async {
            let response: Response<Incoming> = self
                .client
                .request(request)
                .await
                .map_err(|e| ProxyError::Transport(e.to_string()))?;

            RemoteReply::read(response).await
        };

        let reply = time::timeout(self.timeout_duration, call)
            .await
            .map_err(|_| ProxyError::Timeout(self.timeout_duration.as_millis() as u64))??;

        tracing::debug!(
            target_uri = %uri,
            status = %reply.status,
            bytes = reply.body.len(),
            "Remote replied"
        );

        Ok(reply)
    }
}

fn target_uri(config: &RemoteConfig) -> Result<Uri, ProxyError> {
    let host = config.service.as_deref().ok_or(ProxyError::NotConfigured)?;
    let raw = format!("http://{}:{}/", host, config.port);
    raw.parse().map_err(|_| ProxyError::InvalidTarget(raw))
}
