//! Behavior handlers.
//!
//! # Data Flow
//! ```text
//! Dispatcher (http/server.rs)
//!     → routing resolves path to a Behavior
//!     → one handler below builds the whole response
//!     → BehaviorError (if any) becomes the response
//! ```
//!
//! # Design Decisions
//! - Handlers never call each other and share no mutable state
//! - Randomness comes from a caller-supplied `Rng`; production passes the
//!   thread-local generator, tests pass a seeded one
//! - Only the delay handler suspends

pub mod assets;
pub mod bytes;
pub mod cache;
pub mod delay;
pub mod duration;
pub mod echo;
pub mod error;
pub mod redirect;
pub mod status;
pub mod unstable;

pub use assets::{AssetStore, EmbeddedAssets, MemoryAssets};
pub use error::BehaviorError;
