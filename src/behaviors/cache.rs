//! `/cache` and `/cache/{seconds}`: conditional and max-age caching.

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::Response,
};
use chrono::{DateTime, Utc};
use sha1::{Digest, Sha1};

use crate::behaviors::BehaviorError;
use crate::http::response::empty;

/// RFC 1123 date as used in HTTP headers.
const HTTP_DATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// 304 for conditional requests, otherwise fresh validators.
pub fn respond(headers: &HeaderMap) -> Response {
    respond_at(headers, Utc::now())
}

pub fn respond_at(headers: &HeaderMap, now: DateTime<Utc>) -> Response {
    if is_conditional(headers) {
        return empty(StatusCode::NOT_MODIFIED);
    }

    let last_modified = now.format(HTTP_DATE).to_string();
    let etag = entity_tag(&last_modified);

    let mut response = Response::new(Body::empty());
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&last_modified) {
        headers.insert(header::LAST_MODIFIED, value);
    }
    if let Ok(value) = HeaderValue::from_str(&etag) {
        headers.insert(header::ETAG, value);
    }
    response
}

/// `Cache-Control: public, max-age=<seconds>`.
pub fn respond_for(param: &str) -> Result<Response, BehaviorError> {
    let seconds: i64 = param
        .parse()
        .map_err(|e: std::num::ParseIntError| BehaviorError::validation(e.to_string()))?;

    let mut response = Response::new(Body::empty());
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        HeaderValue::from_str(&format!("public, max-age={seconds}"))
            .map_err(|e| BehaviorError::validation(e.to_string()))?,
    );
    Ok(response)
}

fn is_conditional(headers: &HeaderMap) -> bool {
    [header::IF_MODIFIED_SINCE, header::IF_NONE_MATCH]
        .iter()
        .any(|name| headers.get(name).is_some_and(|v| !v.is_empty()))
}

/// Strong validator: quoted hex SHA-1 of the Last-Modified value.
fn entity_tag(last_modified: &str) -> String {
    let digest = Sha1::digest(last_modified.as_bytes());
    format!("\"{digest:x}\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap()
    }

    #[test]
    fn test_fresh_request_gets_validators() {
        let response = respond_at(&HeaderMap::new(), fixed_now());
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::LAST_MODIFIED],
            "Tue, 05 Mar 2024 14:07:09 GMT"
        );
        let etag = response.headers()[header::ETAG].to_str().unwrap();
        assert_eq!(etag.len(), 42);
        assert!(etag.starts_with('"') && etag.ends_with('"'));
    }

    #[test]
    fn test_etag_hashes_the_timestamp() {
        // sha1("") would be da39a3ee...; the tag must depend on the date.
        let a = entity_tag("Tue, 05 Mar 2024 14:07:09 GMT");
        let b = entity_tag("Tue, 05 Mar 2024 14:07:10 GMT");
        assert_ne!(a, b);
        assert_ne!(a, "\"da39a3ee5e6b4b0d3255bfef95601890afd80709\"");
        assert_eq!(a, entity_tag("Tue, 05 Mar 2024 14:07:09 GMT"));
    }

    #[test]
    fn test_conditional_headers_yield_304() {
        for name in [header::IF_NONE_MATCH, header::IF_MODIFIED_SINCE] {
            let mut headers = HeaderMap::new();
            headers.insert(name, HeaderValue::from_static("\"abc\""));
            let response = respond_at(&headers, fixed_now());
            assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
            assert!(response.headers().get(header::ETAG).is_none());
        }
    }

    #[test]
    fn test_empty_conditional_header_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(header::IF_NONE_MATCH, HeaderValue::from_static(""));
        assert_eq!(respond_at(&headers, fixed_now()).status(), StatusCode::OK);
    }

    #[test]
    fn test_max_age() {
        let response = respond_for("3600").unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CACHE_CONTROL], "public, max-age=3600");
    }

    #[test]
    fn test_negative_max_age_is_echoed() {
        let response = respond_for("-5").unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CACHE_CONTROL], "public, max-age=-5");
    }

    #[test]
    fn test_max_age_parse_errors_propagate() {
        assert_eq!(
            respond_for("soon").unwrap_err(),
            BehaviorError::validation("invalid digit found in string")
        );
        assert_eq!(
            respond_for("99999999999999999999").unwrap_err(),
            BehaviorError::validation("number too large to fit in target type")
        );
    }
}
