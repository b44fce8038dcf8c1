//! Request translation.
//!
//! # Responsibilities
//! - Resolve the outbound verb from the inbound method string
//! - Pick the target path (override wins) and fold doubled separators
//! - Copy headers and query parameters verbatim
//! - Hand the body stream over without reading it
//!
//! # Design Decisions
//! - Verb resolution is total: anything unrecognized forwards as GET
//! - DELETE never carries a body (backend client limitation)
//! - A missing body is logged and forwarded as absent, never fatal

use axum::body::Body;
use axum::http::{HeaderMap, Method};

use crate::context::RequestContext;

/// HTTP verbs the backend client supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
    Options,
    Head,
}

impl Verb {
    /// Resolve a method string, case-insensitively. Unrecognized, empty,
    /// and absent methods all resolve to GET.
    pub fn resolve(method: Option<&str>) -> Self {
        let Some(method) = method else {
            return Verb::Get;
        };
        match method.to_ascii_lowercase().as_str() {
            "post" => Verb::Post,
            "put" => Verb::Put,
            "delete" => Verb::Delete,
            "options" => Verb::Options,
            "head" => Verb::Head,
            _ => Verb::Get,
        }
    }

    pub fn as_method(self) -> Method {
        match self {
            Verb::Get => Method::GET,
            Verb::Post => Method::POST,
            Verb::Put => Method::PUT,
            Verb::Delete => Method::DELETE,
            Verb::Options => Method::OPTIONS,
            Verb::Head => Method::HEAD,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
            Verb::Options => "OPTIONS",
            Verb::Head => "HEAD",
        }
    }
}

/// What gets dispatched to the resilient client.
#[derive(Debug)]
pub struct OutboundRequest {
    pub verb: Verb,
    pub path: String,
    /// Inbound headers, copied verbatim; per-name value order preserved.
    pub headers: HeaderMap,
    /// Query parameters in inbound order, multi-valued names repeated.
    pub query: Vec<(String, String)>,
    pub body: Option<Body>,
}

/// Build the outbound request from the inbound one and the routing
/// decisions recorded on the context.
pub fn translate(ctx: &mut RequestContext) -> OutboundRequest {
    let verb = Verb::resolve(Some(ctx.method().as_str()));
    let headers = ctx.inbound_headers().clone();
    let query = parse_query(ctx.raw_query());
    let path = target_path(ctx);
    let body = request_body(ctx, verb);

    OutboundRequest {
        verb,
        path,
        headers,
        query,
        body,
    }
}

/// The override path from an upstream routing step wins over the inbound
/// path. Doubled separators are folded in a single left-to-right pass:
/// only exact adjacent pairs collapse, so `/a///b` becomes `/a//b`.
fn target_path(ctx: &RequestContext) -> String {
    let path = ctx.uri_override().unwrap_or_else(|| ctx.path());
    path.replace("//", "/")
}

fn request_body(ctx: &mut RequestContext, verb: Verb) -> Option<Body> {
    // The backend client does not support a body on DELETE.
    if verb == Verb::Delete {
        return None;
    }

    match ctx.take_buffered_body().or_else(|| ctx.take_inbound_body()) {
        Some(body) => Some(body),
        None => {
            tracing::warn!(
                request_id = %ctx.request_id(),
                "request body unavailable, forwarding without one"
            );
            None
        }
    }
}

fn parse_query(raw: Option<&str>) -> Vec<(String, String)> {
    match raw {
        Some(query) => url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect(),
        None => Vec::new(),
    }
}
