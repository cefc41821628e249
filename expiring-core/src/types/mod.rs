//! Concrete types for the expiring cache.
//!
//! - [`SystemClock`] / [`ManualClock`]: [`Clock`](crate::traits::Clock) implementations
//! - [`FnRefresh`] / [`SyncFnRefresh`] / [`NoRefresh`]: [`Refresh`](crate::traits::Refresh) adapters

mod clock;
mod refresh;

pub use clock::*;
pub use refresh::*;
