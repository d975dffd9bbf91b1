//! `/delay/{duration}`: answer after a bounded wait.
//!
//! The timer races a cancellation signal. Whichever fires first decides the
//! response: the timer yields `200 delayed ok`, cancellation yields 499.
//! A client that disconnects drops the handler future instead; the
//! [`ClientClosedGuard`] records that outcome.

use std::future::Future;
use std::time::Duration;

use axum::{body::Body, http::StatusCode, response::Response};

use crate::behaviors::duration::BoundedDuration;
use crate::behaviors::BehaviorError;
use crate::config::BehaviorConfig;
use crate::http::response::empty;
use crate::observability::metrics;

/// Non-standard "client closed request".
pub const CLIENT_CLOSED_REQUEST: u16 = 499;

pub const DELAYED_OK: &str = "delayed ok";

/// Which side of the race finished first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayOutcome {
    Elapsed,
    Cancelled,
}

/// Wait for `duration` unless `cancelled` resolves first.
pub async fn race<F>(duration: Duration, cancelled: F) -> DelayOutcome
where
    F: Future<Output = ()>,
{
    tokio::select! {
        biased;
        _ = cancelled => DelayOutcome::Cancelled,
        _ = tokio::time::sleep(duration) => DelayOutcome::Elapsed,
    }
}

pub async fn respond<F>(
    param: &str,
    limits: &BehaviorConfig,
    cancelled: F,
) -> Result<Response, BehaviorError>
where
    F: Future<Output = ()>,
{
    respond_observed(param, limits, cancelled, record_client_closed).await
}

/// Like [`respond`], running `on_abandon` if the wait is dropped unfinished.
pub async fn respond_observed<F, A>(
    param: &str,
    limits: &BehaviorConfig,
    cancelled: F,
    on_abandon: A,
) -> Result<Response, BehaviorError>
where
    F: Future<Output = ()>,
    A: FnOnce(),
{
    let max = Duration::from_secs(limits.max_delay_secs);
    let delay = BoundedDuration::parse(param, Duration::ZERO, max).map_err(|e| {
        tracing::debug!(input = %param, error = %e, "Rejected delay");
        BehaviorError::validation("Invalid duration")
    })?;

    let mut guard = ClientClosedGuard::armed(on_abandon);
    let outcome = race(delay.get(), cancelled).await;
    guard.disarm();

    Ok(match outcome {
        DelayOutcome::Elapsed => Response::new(Body::from(DELAYED_OK)),
        DelayOutcome::Cancelled => {
            tracing::info!(delay = ?delay.get(), "Delay cancelled before it elapsed");
            client_closed()
        }
    })
}

fn client_closed() -> Response {
    match StatusCode::from_u16(CLIENT_CLOSED_REQUEST) {
        Ok(status) => empty(status),
        Err(_) => empty(StatusCode::BAD_REQUEST),
    }
}

fn record_client_closed() {
    tracing::info!(status = CLIENT_CLOSED_REQUEST, "Client closed request during delay");
    metrics::record_client_closed("delay");
}

/// Runs its hook if the wait is dropped before finishing.
struct ClientClosedGuard<A: FnOnce()> {
    on_abandon: Option<A>,
}

impl<A: FnOnce()> ClientClosedGuard<A> {
    fn armed(on_abandon: A) -> Self {
        Self {
            on_abandon: Some(on_abandon),
        }
    }

    fn disarm(&mut self) {
        self.on_abandon = None;
    }
}

impl<A: FnOnce()> Drop for ClientClosedGuard<A> {
    fn drop(&mut self) {
        if let Some(on_abandon) = self.on_abandon.take() {
            on_abandon();
        }
    }
}
