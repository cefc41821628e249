//! Seams between the cache and the code that feeds it.

use async_trait::async_trait;

// ═══════════════════════════════════════════════════════════════════════════════
// REFRESH TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Producer of fresh values for one cached slot.
///
/// `Ok(None)` is the null result: it is stored, but never counts as cached,
/// so the next read calls `refresh` again.
///
/// Closures can be adapted with [`FnRefresh`](crate::types::FnRefresh) (async)
/// or [`SyncFnRefresh`](crate::types::SyncFnRefresh) (sync).
#[async_trait]
pub trait Refresh<T>: Send + Sync {
    /// Error returned to the reader when a refresh fails.
    type Error;

    /// Produces the next value for the slot.
    async fn refresh(&self) -> std::result::Result<Option<T>, Self::Error>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// CLOCK TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Wall-clock source used for freshness checks.
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}
