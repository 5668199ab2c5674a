//! Shared utilities for integration testing.

#![allow(dead_code)]

use async_trait::async_trait;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use status_proxy::config::{RemoteConfig, ServiceConfig};
use status_proxy::http::{AppState, HttpServer};
use status_proxy::proxy::RemoteClient;
use status_proxy::status::{
    InstanceIdentity, StatusRecord, StatusSource, StatusStore, StoreResult,
};

/// Start a programmable mock remote. Each connection gets `(status, body)`
/// from `f`. Returns the bound address.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let mut buf = [0u8; 1024];
                        let _ = socket.read(&mut buf).await;

                        let (status, body) = f().await;
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a mock remote that always answers `status` with `body`.
pub async fn start_mock_backend(status: u16, body: &'static str) -> SocketAddr {
    start_programmable_backend(move || async move { (status, body.to_string()) }).await
}

/// Start a remote answering `body` that keeps the raw head of every
/// request it receives.
pub async fn start_recording_backend(body: &'static str) -> (SocketAddr, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorded = seen.clone();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let recorded = recorded.clone();
            tokio::spawn(async move {
                let mut head: Vec<u8> = Vec::new();
                let mut buf = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => head.extend_from_slice(&buf[..n]),
                    }
                }
                recorded
                    .lock()
                    .unwrap()
                    .push(String::from_utf8_lossy(&head).into_owned());

                let response_str = format!(
                    "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = socket.write_all(response_str.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (addr, seen)
}

/// Start a remote that accepts connections and never answers.
pub async fn start_hanging_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    addr
}

/// An address nothing listens on.
pub async fn unreachable_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Configuration pointing the remote at `remote`.
pub fn config_with_remote(remote: Option<SocketAddr>, timeout_ms: u64) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.identity.service = Some("orders".into());
    config.remote = RemoteConfig {
        service: remote.map(|a| a.ip().to_string()),
        port: remote.map(|a| a.port()).unwrap_or(80),
        timeout_ms,
    };
    config
}

/// Build state with a static status body.
pub fn static_state(config: &ServiceConfig) -> AppState {
    let identity = Arc::new(InstanceIdentity::with_host("test-host", config));
    AppState {
        status: StatusSource::fixed(&identity).unwrap(),
        remote: RemoteClient::new(&config.remote),
        identity,
    }
}

/// Build state backed by `store`.
pub fn store_state(config: &ServiceConfig, store: Arc<dyn StatusStore>) -> AppState {
    AppState {
        identity: Arc::new(InstanceIdentity::with_host("test-host", config)),
        status: StatusSource::Store(store),
        remote: RemoteClient::new(&config.remote),
    }
}

/// Serve `state` on an ephemeral port and return its address.
pub async fn spawn_service(state: AppState) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(state);

    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    addr
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Scripted status store counting every lookup.
pub struct CountingStore {
    pub calls: AtomicUsize,
    pub record: Mutex<StoreResult<StatusRecord>>,
}

impl CountingStore {
    pub fn new(record: StoreResult<StatusRecord>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            record: Mutex::new(record),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set(&self, record: StoreResult<StatusRecord>) {
        *self.record.lock().unwrap() = record;
    }
}

#[async_trait]
impl StatusStore for CountingStore {
    async fn fetch_status(&self, _service: &str) -> StoreResult<StatusRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.record.lock().unwrap().clone()
    }
}
