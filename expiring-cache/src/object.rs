//! A single lazily refreshed, time-expiring value.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::{debug, instrument, warn};

use expiring_core::constants::{DEFAULT_TTL, NEVER_UPDATED};
use expiring_core::traits::{Clock, Refresh};
use expiring_core::types::{FnRefresh, NoRefresh, SyncFnRefresh, SystemClock};

/// Options for building a [`CachedObject`].
pub struct CachedObjectOptions<T, E> {
    /// How long a fetched value stays valid. `None` takes the 12 hour default
    /// (or the owning cache's configured default).
    pub ttl: Option<Duration>,
    /// Producer of fresh values. `None` installs [`NoRefresh`].
    pub refresh: Option<Arc<dyn Refresh<T, Error = E>>>,
}

impl<T, E> CachedObjectOptions<T, E> {
    /// Creates empty options.
    pub fn new() -> Self {
        Self {
            ttl: None,
            refresh: None,
        }
    }

    /// Sets the time-to-live.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Sets the refresher.
    pub fn with_refresher<R>(mut self, refresher: R) -> Self
    where
        R: Refresh<T, Error = E> + 'static,
    {
        self.refresh = Some(Arc::new(refresher));
        self
    }

    /// Sets an async closure as the refresher.
    pub fn with_refresh<F, Fut>(self, f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Option<T>, E>> + Send + 'static,
        T: Send + 'static,
        E: Send + 'static,
    {
        self.with_refresher(FnRefresh::new(f))
    }

    /// Sets a synchronous closure as the refresher.
    pub fn with_sync_refresh<F>(self, f: F) -> Self
    where
        F: Fn() -> Result<Option<T>, E> + Send + Sync + 'static,
        T: Send + 'static,
        E: Send + 'static,
    {
        self.with_refresher(SyncFnRefresh::new(f))
    }
}

impl<T, E> Default for CachedObjectOptions<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> fmt::Debug for CachedObjectOptions<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedObjectOptions")
            .field("ttl", &self.ttl)
            .field("has_refresh", &self.refresh.is_some())
            .finish()
    }
}

/// Mutable half of a cached object.
struct Slot<T> {
    value: Option<T>,
    /// Milliseconds since epoch, `NEVER_UPDATED` until the first refresh.
    last_updated: i64,
    refreshed: bool,
}

/// One lazily refreshed value with a TTL.
///
/// Reads return the stored value while it is present and no older than the
/// TTL; otherwise they run the refresher and store what it returns.
///
/// There is no single-flight guard. Two reads that both find the slot stale
/// each run the refresher, and the one that finishes last wins.
pub struct CachedObject<T, E> {
    ttl: Duration,
    refresh: Arc<dyn Refresh<T, Error = E>>,
    clock: Arc<dyn Clock>,
    slot: RwLock<Slot<T>>,
}

impl<T, E> CachedObject<T, E>
where
    T: Clone + Send + 'static,
    E: Send + 'static,
{
    /// Creates an object on the system clock.
    pub fn new(options: CachedObjectOptions<T, E>) -> Self {
        Self::with_clock(options, Arc::new(SystemClock))
    }

    /// Creates an object on a custom clock.
    pub fn with_clock(options: CachedObjectOptions<T, E>, clock: Arc<dyn Clock>) -> Self {
        Self::build(options, DEFAULT_TTL, clock)
    }

    pub(crate) fn build(
        options: CachedObjectOptions<T, E>,
        default_ttl: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let refresh: Arc<dyn Refresh<T, Error = E>> = match options.refresh {
            Some(refresh) => refresh,
            None => {
                warn!("Cached object has no refresh function, reads will always yield no value");
                Arc::new(NoRefresh::<E>::new())
            }
        };

        Self {
            ttl: options.ttl.unwrap_or(default_ttl),
            refresh,
            clock,
            slot: RwLock::new(Slot {
                value: None,
                last_updated: NEVER_UPDATED,
                refreshed: false,
            }),
        }
    }

    /// Returns true if a value is stored and it is no older than the TTL.
    pub fn is_valid(&self) -> bool {
        let slot = self.slot.read();
        slot.value.is_some() && self.is_fresh(slot.last_updated)
    }

    /// Returns the stored value if it is still valid. Never refreshes.
    pub fn peek(&self) -> Option<T> {
        let slot = self.slot.read();
        match &slot.value {
            Some(value) if self.is_fresh(slot.last_updated) => Some(value.clone()),
            _ => None,
        }
    }

    /// Returns the cached value, refreshing it first if it is not valid.
    ///
    /// A refresh error is returned as-is and leaves the stored value and
    /// timestamp untouched, so the next read tries again. A successful
    /// refresh is stored even when it yields `None`.
    #[instrument(skip_all)]
    pub async fn get_value(&self) -> Result<Option<T>, E> {
        if let Some(value) = self.peek() {
            debug!("Cache hit");
            return Ok(Some(value));
        }

        debug!("Cache miss, refreshing");
        let value = self.refresh.refresh().await?;

        let mut slot = self.slot.write();
        slot.last_updated = self.clock.now_millis();
        slot.refreshed = true;
        slot.value = value.clone();

        Ok(value)
    }
}

impl<T, E> CachedObject<T, E> {
    /// Returns the configured time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns when the last successful refresh finished, if ever.
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        let slot = self.slot.read();
        if !slot.refreshed {
            return None;
        }
        DateTime::from_timestamp_millis(slot.last_updated)
    }

    fn is_fresh(&self, last_updated: i64) -> bool {
        let ttl = i64::try_from(self.ttl.as_millis()).unwrap_or(i64::MAX);
        self.clock.now_millis().saturating_sub(last_updated) <= ttl
    }
}

impl<T, E> fmt::Debug for CachedObject<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.slot.read();
        f.debug_struct("CachedObject")
            .field("ttl", &self.ttl)
            .field("last_updated", &slot.last_updated)
            .field("has_value", &slot.value.is_some())
            .finish()
    }
}
