//! `/unstable?failure-rate=p`: fail with probability `p`.

use axum::{http::StatusCode, response::Response};
use rand::Rng;

use crate::config::BehaviorConfig;
use crate::http::response::{empty, mark_uncacheable, status_text};

pub const FAILURE_RATE_PARAM: &str = "failure-rate";

pub fn respond(failure_rate: Option<&str>, limits: &BehaviorConfig) -> Response {
    respond_with(failure_rate, limits, &mut rand::thread_rng())
}

pub fn respond_with<R: Rng>(
    failure_rate: Option<&str>,
    limits: &BehaviorConfig,
    rng: &mut R,
) -> Response {
    let rate = resolve_failure_rate(failure_rate, limits.default_failure_rate);
    let draw: f64 = rng.gen();

    let mut response = if draw > rate {
        empty(StatusCode::OK)
    } else {
        status_text(StatusCode::INTERNAL_SERVER_ERROR)
    };
    mark_uncacheable(response.headers_mut());
    response
}

/// Use the requested rate only when it lies strictly inside (0, 1).
pub fn resolve_failure_rate(requested: Option<&str>, default: f64) -> f64 {
    requested
        .and_then(|raw| raw.parse::<f64>().ok())
        .filter(|rate| *rate > 0.0 && *rate < 1.0)
        .unwrap_or(default)
}
