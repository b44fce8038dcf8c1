//! Shared utilities for integration testing.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

use route_forwarder::client::{ClientFactory, ClientHandle, DispatchError};
use route_forwarder::http::request::OutboundRequest;
use route_forwarder::http::response::ClientResponse;

/// Initialize test logging once; later calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

/// Start a simple mock backend that returns a fixed JSON response.
pub async fn start_mock_backend(addr: SocketAddr, body: &'static str) {
    let listener = TcpListener::bind(addr).await.unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let mut buf = [0u8; 4096];
                        let _ = socket.read(&mut buf).await;

                        let response_str = format!(
                            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nServer: mock\r\nConnection: close\r\n\r\n{}",
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
}

/// What the scripted client saw when it was invoked.
pub type RecordedRequest = OutboundRequest;

/// A scripted resilient client standing in for the real collaborator.
pub struct ScriptedClient {
    reply: Mutex<Option<Result<ClientResponse, DispatchError>>>,
    seen: Mutex<Option<RecordedRequest>>,
}

impl ScriptedClient {
    pub fn replying(status: StatusCode, headers: HeaderMap, body: &'static str) -> Arc<Self> {
        Arc::new(Self {
            reply: Mutex::new(Some(Ok(ClientResponse {
                status,
                headers,
                body: Some(axum::body::Body::from(body)),
            }))),
            seen: Mutex::new(None),
        })
    }

    pub fn failing(error: DispatchError) -> Arc<Self> {
        Arc::new(Self {
            reply: Mutex::new(Some(Err(error))),
            seen: Mutex::new(None),
        })
    }

    /// The request captured by `execute`, consumable once.
    pub async fn seen_request(&self) -> Option<RecordedRequest> {
        self.seen.lock().await.take()
    }
}

#[async_trait]
impl ClientHandle for ScriptedClient {
    async fn execute(&self, request: OutboundRequest) -> Result<ClientResponse, DispatchError> {
        *self.seen.lock().await = Some(request);
        self.reply
            .lock()
            .await
            .take()
            .expect("scripted reply already consumed")
    }
}

/// Factory resolving exactly one service name to a scripted client.
pub struct SingleServiceFactory {
    service: &'static str,
    client: Arc<ScriptedClient>,
}

impl SingleServiceFactory {
    pub fn new(service: &'static str, client: Arc<ScriptedClient>) -> Arc<Self> {
        Arc::new(Self { service, client })
    }
}

impl ClientFactory for SingleServiceFactory {
    fn client_for(&self, service_id: &str) -> Option<Arc<dyn ClientHandle>> {
        if service_id == self.service {
            Some(self.client.clone())
        } else {
            None
        }
    }
}

/// Convenience builder for common response header sets.
pub fn json_headers(content_length: &'static str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("content-type", HeaderValue::from_static("application/json"));
    headers.insert("content-length", HeaderValue::from_static(content_length));
    headers
}
