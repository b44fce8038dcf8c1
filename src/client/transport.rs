//! Plain HTTP transport binding.
//!
//! # Responsibilities
//! - Compose the outbound URI against a fixed base authority
//! - Dispatch over a pooled hyper client
//! - Map hyper failures into the transport taxonomy
//!
//! # Design Decisions
//! - No load balancing, circuit breaking, retries, or timeouts here; a
//!   resilient wrapper owns those and sits behind the same trait
//! - The inbound Host header is dropped; hyper derives the right one from
//!   the target URI

use async_trait::async_trait;
use axum::body::Body;
use axum::http::uri::{Authority, Scheme};
use axum::http::{header, Request, Uri};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use url::form_urlencoded;
use url::Url;

use crate::client::error::{DispatchError, TransportError};
use crate::client::ClientHandle;
use crate::http::request::OutboundRequest;
use crate::http::response::ClientResponse;

/// A [`ClientHandle`] that speaks plain HTTP to one base address.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client<HttpConnector, Body>,
    scheme: Scheme,
    authority: Authority,
}

impl HttpTransport {
    /// Build a transport for a base URL such as `http://127.0.0.1:3000`.
    pub fn new(base: &Url) -> Result<Self, TransportError> {
        let scheme = match base.scheme() {
            "http" => Scheme::HTTP,
            "https" => Scheme::HTTPS,
            other => {
                return Err(TransportError::General(
                    format!("unsupported scheme: {other}").into(),
                ))
            }
        };

        let host = base
            .host_str()
            .ok_or_else(|| TransportError::UnknownHost(base.to_string()))?;
        let authority = match base.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };
        let authority: Authority = authority
            .parse()
            .map_err(|e: axum::http::uri::InvalidUri| TransportError::Protocol(Box::new(e)))?;

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        Ok(Self {
            client,
            scheme,
            authority,
        })
    }

    fn target_uri(&self, request: &OutboundRequest) -> Result<Uri, TransportError> {
        let path_and_query = if request.query.is_empty() {
            request.path.clone()
        } else {
            let mut serializer = form_urlencoded::Serializer::new(String::new());
            for (name, value) in &request.query {
                serializer.append_pair(name, value);
            }
            format!("{}?{}", request.path, serializer.finish())
        };

        Uri::builder()
            .scheme(self.scheme.clone())
            .authority(self.authority.clone())
            .path_and_query(path_and_query)
            .build()
            .map_err(|e| TransportError::Protocol(Box::new(e)))
    }
}

#[async_trait]
impl ClientHandle for HttpTransport {
    async fn execute(&self, request: OutboundRequest) -> Result<ClientResponse, DispatchError> {
        let uri = self.target_uri(&request)?;

        let mut builder = Request::builder().method(request.verb.as_method()).uri(uri);
        if let Some(headers) = builder.headers_mut() {
            for (name, value) in request.headers.iter() {
                if name != header::HOST {
                    headers.append(name.clone(), value.clone());
                }
            }
        }
        let outbound = builder
            .body(request.body.unwrap_or_else(Body::empty))
            .map_err(|e| TransportError::Protocol(Box::new(e)))?;

        let response = self
            .client
            .request(outbound)
            .await
            .map_err(classify_client_error)?;

        let (parts, incoming) = response.into_parts();
        Ok(ClientResponse {
            status: parts.status,
            headers: parts.headers,
            body: Some(Body::new(incoming)),
        })
    }
}

fn classify_client_error(error: hyper_util::client::legacy::Error) -> TransportError {
    if error.is_connect() {
        TransportError::Connect(Box::new(error))
    } else {
        TransportError::General(Box::new(error))
    }
}
