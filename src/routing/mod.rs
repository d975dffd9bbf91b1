//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → router.rs (ordered route lookup)
//!     → matcher.rs (evaluate match conditions)
//!     → Return: Behavior + param, Mismatch (404), or Fallback (static assets)
//! ```
//!
//! # Design Decisions
//! - Route table built once at startup, immutable at runtime
//! - No regex in hot path (exact and prefix matching only)
//! - Deterministic: same path always resolves to same route
//! - First match wins (fixed priority order)

pub mod matcher;
pub mod router;

pub use router::{Behavior, Resolution, Router};
