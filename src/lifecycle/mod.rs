//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → trigger Shutdown
//!
//! Shutdown (shutdown.rs):
//!     Trigger → server stops accepting → in-flight delays answer 499 → drain → exit
//! ```
//!
//! # Design Decisions
//! - One broadcast channel fans out to the server and every waiting delay
//! - Delays never hold shutdown hostage for their full duration

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
