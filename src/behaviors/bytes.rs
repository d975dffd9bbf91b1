//! `/bytes/{n}`: a body of `n` pseudo-random bytes.

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::Response,
};
use rand::RngCore;

use crate::behaviors::BehaviorError;
use crate::config::BehaviorConfig;

pub fn respond(param: &str, limits: &BehaviorConfig) -> Result<Response, BehaviorError> {
    respond_with(param, limits, &mut rand::thread_rng())
}

pub fn respond_with<R: RngCore>(
    param: &str,
    limits: &BehaviorConfig,
    rng: &mut R,
) -> Result<Response, BehaviorError> {
    let requested: i64 = param
        .parse()
        .map_err(|e: std::num::ParseIntError| BehaviorError::validation(e.to_string()))?;

    if requested < 0 {
        return Err(BehaviorError::validation("Bad Request"));
    }

    if requested == 0 {
        let mut response = Response::new(Body::empty());
        response
            .headers_mut()
            .insert(header::CONTENT_LENGTH, HeaderValue::from_static("0"));
        return Ok(response);
    }

    // Silently capped.
    let count = usize::try_from(requested)
        .unwrap_or(usize::MAX)
        .min(limits.max_bytes);

    let mut payload = vec![0u8; count];
    rng.fill_bytes(&mut payload);

    let mut response = Response::new(Body::from(payload));
    *response.status_mut() = StatusCode::OK;
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/octet-stream"),
    );
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(count));
    Ok(response)
}
