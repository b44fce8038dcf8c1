//! Per-request shared state.
//!
//! # Responsibilities
//! - Carry the inbound request and routing decisions into the filter
//! - Collect the forward outcome (response state XOR gateway error)
//! - Keep a full-fidelity record of origin response headers for diagnostics
//!
//! # Design Decisions
//! - One context per inbound request, owned by the task handling it;
//!   never shared across requests, so no internal synchronization
//! - The outcome is a three-state enum; the first commit wins and later
//!   commits are ignored, which makes success and error mutually exclusive
//! - Body streams are `Option`s consumed with `take`, enforcing read-once

use axum::body::Body;
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, Request, StatusCode, Uri};
use serde::Serialize;
use uuid::Uuid;

use crate::routing::GatewayError;

/// The caller-facing result of a successful forward.
#[derive(Debug)]
pub struct ResponseState {
    /// Backend status, copied verbatim.
    pub status: StatusCode,
    /// Headers that survived the propagation policy.
    pub headers: HeaderMap,
    /// Backend entity stream, passed through unread.
    pub body: Option<Body>,
    /// True when the backend declared a gzip-family Content-Encoding.
    pub gzipped: bool,
}

/// Outcome of the forward, committed exactly once.
#[derive(Debug)]
enum ForwardOutcome {
    Pending,
    Response(ResponseState),
    Failed(GatewayError),
}

/// Diagnostic trace of one forward, collected when `debug_routing` is on.
#[derive(Debug, Clone, Serialize)]
pub struct ForwardTrace {
    pub service: String,
    pub verb: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub request_headers: Vec<(String, String)>,
    pub status: Option<u16>,
    pub response_headers: Vec<(String, String)>,
}

impl ForwardTrace {
    pub fn new(
        service: &str,
        verb: &str,
        path: &str,
        query: &[(String, String)],
        headers: &HeaderMap,
    ) -> Self {
        Self {
            service: service.to_string(),
            verb: verb.to_string(),
            path: path.to_string(),
            query: query.to_vec(),
            request_headers: flatten_headers(headers),
            status: None,
            response_headers: Vec::new(),
        }
    }

    /// Append the backend's reply to the trace.
    pub fn record_reply(&mut self, status: StatusCode, headers: &HeaderMap) {
        self.status = Some(status.as_u16());
        self.response_headers = flatten_headers(headers);
    }

    /// Render the trace for diagnostic logging.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

fn flatten_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}

/// Mutable state for a single inbound request as it moves through the
/// forwarding path. Created when request processing starts, discarded when
/// it ends.
#[derive(Debug)]
pub struct RequestContext {
    request_id: Uuid,
    parts: Parts,
    inbound_body: Option<Body>,
    buffered_body: Option<Body>,
    service_id: Option<String>,
    route_host: Option<Uri>,
    uri_override: Option<String>,
    send_response: bool,
    outcome: ForwardOutcome,
    origin_headers: HeaderMap,
    origin_content_length: Option<String>,
    trace: Option<ForwardTrace>,
}

impl RequestContext {
    /// Create a context from an inbound request.
    pub fn new(request: Request<Body>) -> Self {
        let (parts, body) = request.into_parts();
        Self {
            request_id: Uuid::new_v4(),
            parts,
            inbound_body: Some(body),
            buffered_body: None,
            service_id: None,
            route_host: None,
            uri_override: None,
            send_response: true,
            outcome: ForwardOutcome::Pending,
            origin_headers: HeaderMap::new(),
            origin_content_length: None,
            trace: None,
        }
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    // --- Inbound request ---

    pub fn method(&self) -> &Method {
        &self.parts.method
    }

    pub fn path(&self) -> &str {
        self.parts.uri.path()
    }

    pub fn raw_query(&self) -> Option<&str> {
        self.parts.uri.query()
    }

    pub fn inbound_headers(&self) -> &HeaderMap {
        &self.parts.headers
    }

    /// Take the raw inbound body. Returns `None` once consumed.
    pub fn take_inbound_body(&mut self) -> Option<Body> {
        self.inbound_body.take()
    }

    /// Store a body an earlier filter already had to read. It takes
    /// precedence over the raw inbound body when the forward is built.
    pub fn supply_buffered_body(&mut self, body: Body) {
        self.buffered_body = Some(body);
    }

    /// Take the pre-buffered body, if an earlier filter supplied one.
    pub fn take_buffered_body(&mut self) -> Option<Body> {
        self.buffered_body.take()
    }

    // --- Routing decisions (populated by upstream filters) ---

    pub fn service_id(&self) -> Option<&str> {
        self.service_id.as_deref()
    }

    pub fn set_service_id(&mut self, service_id: impl Into<String>) {
        self.service_id = Some(service_id.into());
    }

    /// A concrete backend host pinned by an earlier step. When set, the
    /// service-level forwarding filter stands down.
    pub fn route_host(&self) -> Option<&Uri> {
        self.route_host.as_ref()
    }

    pub fn set_route_host(&mut self, host: Uri) {
        self.route_host = Some(host);
    }

    /// Path override set by an upstream routing step; preferred over the
    /// inbound request's own path.
    pub fn uri_override(&self) -> Option<&str> {
        self.uri_override.as_deref()
    }

    pub fn set_uri_override(&mut self, uri: impl Into<String>) {
        self.uri_override = Some(uri.into());
    }

    /// Whether the pipeline still intends to send a response to the caller.
    pub fn send_response(&self) -> bool {
        self.send_response
    }

    pub fn set_send_response(&mut self, send: bool) {
        self.send_response = send;
    }

    // --- Forward outcome (write-once) ---

    /// Commit a successful forward. Ignored if an outcome is already
    /// recorded.
    pub fn commit_response(&mut self, state: ResponseState) {
        match self.outcome {
            ForwardOutcome::Pending => self.outcome = ForwardOutcome::Response(state),
            _ => tracing::warn!(
                request_id = %self.request_id,
                "forward outcome already recorded, dropping response"
            ),
        }
    }

    /// Commit a failed forward. Ignored if an outcome is already recorded.
    pub fn record_error(&mut self, error: GatewayError) {
        match self.outcome {
            ForwardOutcome::Pending => self.outcome = ForwardOutcome::Failed(error),
            _ => tracing::warn!(
                request_id = %self.request_id,
                cause = error.cause_code,
                "forward outcome already recorded, dropping error"
            ),
        }
    }

    pub fn response(&self) -> Option<&ResponseState> {
        match &self.outcome {
            ForwardOutcome::Response(state) => Some(state),
            _ => None,
        }
    }

    /// Take the response body for the downstream writer. Single-consumer.
    pub fn take_response_body(&mut self) -> Option<Body> {
        match &mut self.outcome {
            ForwardOutcome::Response(state) => state.body.take(),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&GatewayError> {
        match &self.outcome {
            ForwardOutcome::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub fn error_status(&self) -> Option<StatusCode> {
        self.error().map(|e| e.status)
    }

    // --- Origin response record (diagnostics, kept regardless of filtering) ---

    /// Record one occurrence of a header exactly as the backend sent it.
    pub fn add_origin_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.origin_headers.append(name, value);
    }

    pub fn origin_headers(&self) -> &HeaderMap {
        &self.origin_headers
    }

    /// Content length as declared by the backend, kept verbatim because it
    /// can diverge from the actual byte count once the body is re-streamed
    /// or re-encoded downstream.
    pub fn set_origin_content_length(&mut self, value: impl Into<String>) {
        self.origin_content_length = Some(value.into());
    }

    pub fn origin_content_length(&self) -> Option<&str> {
        self.origin_content_length.as_deref()
    }

    // --- Routing debug trace ---

    pub fn set_trace(&mut self, trace: ForwardTrace) {
        self.trace = Some(trace);
    }

    pub fn trace(&self) -> Option<&ForwardTrace> {
        self.trace.as_ref()
    }

    pub fn trace_mut(&mut self) -> Option<&mut ForwardTrace> {
        self.trace.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> RequestContext {
        RequestContext::new(
            Request::builder()
                .uri("http://gateway/items?x=1")
                .body(Body::empty())
                .unwrap(),
        )
    }

    #[test]
    fn test_defaults() {
        let ctx = context();
        assert!(ctx.send_response());
        assert!(ctx.service_id().is_none());
        assert!(ctx.route_host().is_none());
        assert!(ctx.response().is_none());
        assert!(ctx.error().is_none());
    }

    #[test]
    fn test_inbound_body_taken_once() {
        let mut ctx = context();
        assert!(ctx.take_inbound_body().is_some());
        assert!(ctx.take_inbound_body().is_none());
    }

    #[test]
    fn test_error_does_not_overwrite_response() {
        let mut ctx = context();
        ctx.commit_response(ResponseState {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: None,
            gzipped: false,
        });
        ctx.record_error(GatewayError::internal("late failure"));

        assert!(ctx.error().is_none());
        assert_eq!(ctx.response().unwrap().status, StatusCode::OK);
    }

    #[test]
    fn test_response_does_not_overwrite_error() {
        let mut ctx = context();
        ctx.record_error(GatewayError::internal("dispatch blew up"));
        ctx.commit_response(ResponseState {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: None,
            gzipped: false,
        });

        assert!(ctx.response().is_none());
        assert_eq!(ctx.error_status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn test_origin_headers_keep_duplicates() {
        let mut ctx = context();
        ctx.add_origin_header(
            HeaderName::from_static("set-cookie"),
            HeaderValue::from_static("a=1"),
        );
        ctx.add_origin_header(
            HeaderName::from_static("set-cookie"),
            HeaderValue::from_static("b=2"),
        );

        let values: Vec<_> = ctx.origin_headers().get_all("set-cookie").iter().collect();
        assert_eq!(values.len(), 2);
    }
}
