//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts, limits, probabilities)
//! - Check that addresses parse before anything binds
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: FixtureConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::FixtureConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("timeouts.request_secs ({request_secs}) must exceed behaviors.max_delay_secs ({max_delay_secs})")]
    TimeoutBelowDelay { request_secs: u64, max_delay_secs: u64 },

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("behaviors.default_failure_rate ({0}) must be strictly between 0 and 1")]
    FailureRate(f64),

    #[error("observability.log_format {0:?} is not one of \"pretty\", \"json\"")]
    LogFormat(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &FixtureConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    let behaviors = &config.behaviors;
    if config.timeouts.request_secs <= behaviors.max_delay_secs {
        errors.push(ValidationError::TimeoutBelowDelay {
            request_secs: config.timeouts.request_secs,
            max_delay_secs: behaviors.max_delay_secs,
        });
    }
    if behaviors.max_bytes == 0 {
        errors.push(ValidationError::Zero { field: "behaviors.max_bytes" });
    }
    if behaviors.max_redirects == 0 {
        errors.push(ValidationError::Zero { field: "behaviors.max_redirects" });
    }
    if config.limits.max_body_size == 0 {
        errors.push(ValidationError::Zero { field: "limits.max_body_size" });
    }
    // NaN fails both comparisons and lands here too.
    if !(behaviors.default_failure_rate > 0.0 && behaviors.default_failure_rate < 1.0) {
        errors.push(ValidationError::FailureRate(behaviors.default_failure_rate));
    }

    match config.observability.log_format.as_str() {
        "pretty" | "json" => {}
        other => errors.push(ValidationError::LogFormat(other.to_string())),
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
