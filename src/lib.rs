//! HTTP behavior fixture server library.
//!
//! Reproduces specific HTTP protocol behaviors (status codes, delays, byte
//! payloads, redirect chains, cache semantics, flaky responses, request
//! echoing) selected by request path, for testing HTTP clients, proxies and
//! load tools.

pub mod behaviors;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::FixtureConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
