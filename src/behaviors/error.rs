//! Error taxonomy for the behavior handlers.
//!
//! Every error is translated into a response at the point of detection;
//! nothing propagates past the request that produced it.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::http::response::{empty, plain_error, status_text};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BehaviorError {
    /// Parameterized route with the wrong number of path segments.
    #[error("Not found")]
    RoutingMismatch,

    /// Malformed numeric, duration or list input.
    #[error("{0}")]
    Validation(String),

    /// Missing or malformed bearer credentials.
    #[error("unauthorized")]
    Unauthorized,

    /// Static lookup miss.
    #[error("asset not found")]
    AssetMissing,

    /// The index document could not be read.
    #[error("index document unavailable")]
    FatalAsset,
}

impl BehaviorError {
    pub fn validation(message: impl Into<String>) -> Self {
        BehaviorError::Validation(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            BehaviorError::RoutingMismatch | BehaviorError::AssetMissing => StatusCode::NOT_FOUND,
            BehaviorError::Validation(_) => StatusCode::BAD_REQUEST,
            BehaviorError::Unauthorized => StatusCode::UNAUTHORIZED,
            BehaviorError::FatalAsset => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for BehaviorError {
    fn into_response(self) -> Response {
        match self {
            BehaviorError::RoutingMismatch | BehaviorError::Validation(_) => {
                plain_error(self.status(), &self.to_string())
            }
            BehaviorError::Unauthorized => {
                let mut response = empty(StatusCode::UNAUTHORIZED);
                response
                    .headers_mut()
                    .insert(header::WWW_AUTHENTICATE, header::HeaderValue::from_static("Bearer"));
                response
            }
            BehaviorError::AssetMissing | BehaviorError::FatalAsset => status_text(self.status()),
        }
    }
}
