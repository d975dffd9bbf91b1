//! Response construction helpers.
//!
//! # Responsibilities
//! - Build plain-text error responses in one consistent shape
//! - Mark non-deterministic responses as uncacheable
//! - Build JSON reflection bodies
//!
//! # Design Decisions
//! - Error bodies are the message plus a trailing newline, sent as
//!   `text/plain; charset=utf-8` with `X-Content-Type-Options: nosniff`
//! - Status and headers are fixed before a body is attached

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Shared caches keep the entry for a year; clients must not store it.
pub const SURROGATE_CONTROL_LONG_LIVED: &str = "max-age=31557600";
pub const CACHE_CONTROL_NO_STORE: &str = "no-store, max-age=0";

const SURROGATE_CONTROL: &str = "surrogate-control";

/// Content type of the JSON reflection endpoints.
pub const TEXT_JSON: &str = "text/json; charset=utf-8";

/// Plain-text error response with `message` as body.
pub fn plain_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        ],
        format!("{message}\n"),
    )
        .into_response()
}

/// Error-style response whose body is the status' canonical reason phrase.
pub fn status_text(status: StatusCode) -> Response {
    plain_error(status, status.canonical_reason().unwrap_or(""))
}

/// Status-only response with an empty body.
pub fn empty(status: StatusCode) -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = status;
    response
}

/// Add the uncacheable header pair used by the random endpoints.
pub fn mark_uncacheable(headers: &mut HeaderMap) {
    headers.insert(
        SURROGATE_CONTROL,
        HeaderValue::from_static(SURROGATE_CONTROL_LONG_LIVED),
    );
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(CACHE_CONTROL_NO_STORE),
    );
}

/// 200 response with `value` serialized as JSON.
pub fn text_json<T: Serialize>(value: &T) -> Response {
    match serde_json::to_vec(value) {
        Ok(body) => ([(header::CONTENT_TYPE, TEXT_JSON)], body).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize response body");
            status_text(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_error_shape() {
        let response = plain_error(StatusCode::BAD_REQUEST, "Invalid status");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    }

    #[test]
    fn test_mark_uncacheable() {
        let mut headers = HeaderMap::new();
        mark_uncacheable(&mut headers);
        assert_eq!(headers["surrogate-control"], "max-age=31557600");
        assert_eq!(headers[header::CACHE_CONTROL], "no-store, max-age=0");
    }

    #[test]
    fn test_empty_response() {
        let response = empty(StatusCode::NO_CONTENT);
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(response.headers().get(header::CONTENT_TYPE).is_none());
    }
}
