//! `/status/{code[,code...]}`: respond with a chosen status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rand::Rng;

use crate::behaviors::BehaviorError;
use crate::http::response::{empty, mark_uncacheable, status_text};

/// Respond with one of the comma-separated codes in `param`.
pub fn respond(param: &str) -> Response {
    respond_with(param, &mut rand::thread_rng())
}

pub fn respond_with<R: Rng>(param: &str, rng: &mut R) -> Response {
    let candidates: Vec<&str> = param.split(',').collect();

    let mut response = match pick(&candidates, rng) {
        Ok(code) => status_response(code),
        Err(e) => e.into_response(),
    };

    if candidates.len() > 1 {
        mark_uncacheable(response.headers_mut());
    }
    response
}

/// Validate every candidate, then draw one uniformly.
fn pick<R: Rng>(candidates: &[&str], rng: &mut R) -> Result<i64, BehaviorError> {
    let codes = candidates
        .iter()
        .map(|c| c.parse::<i64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| BehaviorError::validation("Invalid status"))?;

    Ok(codes[rng.gen_range(0..codes.len())])
}

fn status_response(code: i64) -> Response {
    // 1xx cannot be a final response and anything above 999 is not a status code.
    let Some(status) = u16::try_from(code)
        .ok()
        .filter(|c| (200..=999).contains(c))
        .and_then(|c| StatusCode::from_u16(c).ok())
    else {
        return status_text(StatusCode::BAD_REQUEST);
    };

    if status.as_u16() >= 300 {
        status_text(status)
    } else {
        empty(status)
    }
}
