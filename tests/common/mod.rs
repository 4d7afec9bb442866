//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
    routing::any,
    Router,
};
use hikvision_relay::{RelayConfig, RelayServer, Shutdown};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// A request as seen by the mock downstream.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct Captured {
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Captured {
    #[allow(dead_code)]
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("downstream body is JSON")
    }
}

/// Downstream stand-in that records every request and answers with a fixed status.
#[derive(Clone)]
pub struct MockDownstream {
    pub addr: SocketAddr,
    captured: Arc<Mutex<Vec<Captured>>>,
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    delay: Duration,
    reply: &'static str,
    captured: Arc<Mutex<Vec<Captured>>>,
}

async fn record(State(state): State<MockState>, uri: Uri, headers: HeaderMap, body: Bytes) -> (StatusCode, &'static str) {
    // Recorded only if the relay keeps the connection open through the delay.
    tokio::time::sleep(state.delay).await;
    state.captured.lock().unwrap().push(Captured {
        path: uri.path().to_string(),
        headers,
        body,
    });
    (state.status, state.reply)
}

impl MockDownstream {
    /// Start a mock downstream on an ephemeral port.
    pub async fn start(status: StatusCode, reply: &'static str) -> Self {
        Self::start_delayed(status, reply, Duration::ZERO).await
    }

    /// Start a mock downstream that waits `delay` before recording and answering.
    pub async fn start_delayed(status: StatusCode, reply: &'static str, delay: Duration) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let captured = Arc::new(Mutex::new(Vec::new()));

        let app = Router::new()
            .route("/{*path}", any(record))
            .with_state(MockState {
                status,
                delay,
                reply,
                captured: captured.clone(),
            });

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, captured }
    }

    pub fn url(&self) -> String {
        format!("http://{}/raw", self.addr)
    }

    pub fn requests(&self) -> Vec<Captured> {
        self.captured.lock().unwrap().clone()
    }
}

/// Address that refuses connections: bound once, then released.
#[allow(dead_code)]
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Downstream that promises a 100-byte body, sends 3 bytes and hangs up.
///
/// Returns its address and a counter of requests it received.
#[allow(dead_code)]
pub async fn start_truncating_downstream() -> (SocketAddr, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let counter = counter.clone();
            tokio::spawn(async move {
                // Read until the JSON body has fully arrived.
                let mut request = Vec::new();
                let mut buf = [0u8; 4096];
                loop {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => {
                            request.extend_from_slice(&buf[..n]);
                            if request.ends_with(b"}") {
                                break;
                            }
                        }
                    }
                }
                counter.fetch_add(1, Ordering::SeqCst);

                let _ = socket
                    .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 100\r\n\r\nabc")
                    .await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (addr, hits)
}

/// A running relay instance.
pub struct RunningRelay {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
}

impl RunningRelay {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for RunningRelay {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the relay on an ephemeral port, forwarding to `downstream_url`.
pub async fn start_relay(downstream_url: String, forward_unmatched_posts: bool) -> RunningRelay {
    let mut config = RelayConfig::default();
    config.listener.host = "127.0.0.1".into();
    config.listener.port = 0;
    config.relay.downstream_url = downstream_url;
    config.relay.forward_unmatched_posts = forward_unmatched_posts;

    let listener = TcpListener::bind(config.listener.bind_address()).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = RelayServer::new(config).run(listener, server_shutdown).await;
    });

    // Give the accept loop a moment to start.
    tokio::time::sleep(Duration::from_millis(50)).await;

    RunningRelay { addr, shutdown }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
