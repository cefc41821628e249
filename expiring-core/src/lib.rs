//! # Expiring Core
//!
//! Shared building blocks for the expiring cache crates:
//!
//! - **Errors**: configuration and validation errors
//! - **Constants**: default TTL, the "never updated" sentinel, env var names
//! - **Traits**: the [`Refresh`] producer seam and the [`Clock`] time source
//! - **Types**: clock implementations and closure adapters for [`Refresh`]
//!
//! ## Example
//!
//! ```rust
//! use expiring_core::{Clock, ManualClock};
//! use std::time::Duration;
//!
//! let clock = ManualClock::new(1_000);
//! clock.advance(Duration::from_millis(500));
//! assert_eq!(clock.now_millis(), 1_500);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

pub use constants::*;
pub use error::{CacheError, Result};
pub use traits::*;
pub use types::*;
