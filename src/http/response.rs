//! Response translation.
//!
//! # Responsibilities
//! - Copy the backend status verbatim
//! - Record every origin header occurrence for diagnostics
//! - Apply the propagation policy to build the caller-visible header set
//! - Flag gzip-encoded bodies and attach the entity stream unread
//!
//! # Design Decisions
//! - Streaming passthrough: the body is never buffered here
//! - The origin record is kept in full regardless of filtering
//! - The gzip flag is always concrete; no Content-Encoding means false

use axum::body::Body;
use axum::http::{header, HeaderMap, StatusCode};

use crate::context::{RequestContext, ResponseState};
use crate::http::headers::{is_gzip_encoding, is_included_header};

/// Backend reply as returned by the resilient client.
#[derive(Debug)]
pub struct ClientResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Entity stream, if the response declares one.
    pub body: Option<Body>,
}

impl ClientResponse {
    /// First Content-Encoding value, when present.
    pub fn content_encoding(&self) -> Option<&str> {
        self.headers
            .get(header::CONTENT_ENCODING)
            .and_then(|value| value.to_str().ok())
    }

    /// Declared content length, when present and numeric.
    pub fn content_length(&self) -> Option<u64> {
        self.headers
            .get(header::CONTENT_LENGTH)?
            .to_str()
            .ok()?
            .parse()
            .ok()
    }

    pub fn has_entity(&self) -> bool {
        self.body.is_some()
    }
}

/// Translate the backend reply into the context's caller-facing response
/// state.
pub fn apply_response(ctx: &mut RequestContext, response: ClientResponse) {
    let gzipped = response
        .content_encoding()
        .map(is_gzip_encoding)
        .unwrap_or(false);

    let ClientResponse {
        status,
        headers,
        body,
    } = response;

    let mut filtered = HeaderMap::new();
    for (name, value) in headers.iter() {
        ctx.add_origin_header(name.clone(), value.clone());

        if name == header::CONTENT_LENGTH {
            ctx.set_origin_content_length(String::from_utf8_lossy(value.as_bytes()).into_owned());
        }

        if is_included_header(name.as_str()) {
            filtered.append(name.clone(), value.clone());
        }
    }

    ctx.commit_response(ResponseState {
        status,
        headers: filtered,
        body,
        gzipped,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, Request};

    fn context() -> RequestContext {
        RequestContext::new(
            Request::builder()
                .uri("http://gw/items")
                .body(Body::empty())
                .unwrap(),
        )
    }

    fn reply(headers: HeaderMap) -> ClientResponse {
        ClientResponse {
            status: StatusCode::OK,
            headers,
            body: Some(Body::from("{}")),
        }
    }

    #[test]
    fn test_status_and_body_carried_over() {
        let mut ctx = context();
        apply_response(&mut ctx, reply(HeaderMap::new()));

        let state = ctx.response().unwrap();
        assert_eq!(state.status, StatusCode::OK);
        assert!(state.body.is_some());
    }

    #[test]
    fn test_gzip_flag_from_content_encoding() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_ENCODING, HeaderValue::from_static("gzip"));

        let mut ctx = context();
        apply_response(&mut ctx, reply(headers));
        assert!(ctx.response().unwrap().gzipped);
    }

    #[test]
    fn test_gzip_flag_false_without_header() {
        let mut ctx = context();
        apply_response(&mut ctx, reply(HeaderMap::new()));
        assert!(!ctx.response().unwrap().gzipped);
    }

    #[test]
    fn test_gzip_flag_false_for_other_encodings() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_ENCODING, HeaderValue::from_static("br"));

        let mut ctx = context();
        apply_response(&mut ctx, reply(headers));
        assert!(!ctx.response().unwrap().gzipped);
    }

    #[test]
    fn test_content_length_kept_in_origin_record_only() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("42"));

        let mut ctx = context();
        apply_response(&mut ctx, reply(headers));

        let state = ctx.response().unwrap();
        assert!(state.headers.contains_key(header::CONTENT_TYPE));
        assert!(!state.headers.contains_key(header::CONTENT_LENGTH));

        assert!(ctx.origin_headers().contains_key(header::CONTENT_LENGTH));
        assert_eq!(ctx.origin_content_length(), Some("42"));
    }

    #[test]
    fn test_multi_valued_headers_survive_in_both_records() {
        let mut headers = HeaderMap::new();
        headers.append(header::SET_COOKIE, HeaderValue::from_static("a=1"));
        headers.append(header::SET_COOKIE, HeaderValue::from_static("b=2"));

        let mut ctx = context();
        apply_response(&mut ctx, reply(headers));

        let filtered: Vec<_> = ctx
            .response()
            .unwrap()
            .headers
            .get_all(header::SET_COOKIE)
            .iter()
            .collect();
        assert_eq!(filtered.len(), 2);

        let origin: Vec<_> = ctx
            .origin_headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .collect();
        assert_eq!(origin.len(), 2);
    }

    #[test]
    fn test_first_content_encoding_value_wins() {
        let mut headers = HeaderMap::new();
        headers.append(header::CONTENT_ENCODING, HeaderValue::from_static("identity"));
        headers.append(header::CONTENT_ENCODING, HeaderValue::from_static("gzip"));

        let response = reply(headers);
        assert_eq!(response.content_encoding(), Some("identity"));

        let mut ctx = context();
        apply_response(&mut ctx, response);
        assert!(!ctx.response().unwrap().gzipped);
    }
}
