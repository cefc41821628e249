//! Keyed container of independently expiring cached objects.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use expiring_core::constants::DEFAULT_TTL_MS;
use expiring_core::error::{CacheError, Result};
use expiring_core::traits::Clock;
use expiring_core::types::SystemClock;

use crate::object::{CachedObject, CachedObjectOptions};

/// Cache configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// TTL for entries registered without one, in milliseconds
    pub default_ttl_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl_ms: DEFAULT_TTL_MS, // 12 hours
        }
    }
}

impl CacheConfig {
    /// Parses a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the TTL fits the signed millisecond clock.
    pub fn validate(&self) -> Result<()> {
        if i64::try_from(self.default_ttl_ms).is_err() {
            return Err(CacheError::ValidationError(format!(
                "default_ttl_ms {} exceeds {}",
                self.default_ttl_ms,
                i64::MAX
            )));
        }
        Ok(())
    }

    /// Returns the default TTL as a `Duration`.
    pub fn default_ttl(&self) -> Duration {
        Duration::from_millis(self.default_ttl_ms)
    }
}

/// Keyed cache of lazily refreshed values.
///
/// Each key owns one [`CachedObject`] and expires on its own. The underlying
/// map is a `DashMap`; only the operations below are exposed.
///
/// # Thread Safety
///
/// All operations take `&self`. Map guards are never held across a refresh.
pub struct ExpiringCache<K, V, E> {
    entries: DashMap<K, Arc<CachedObject<V, E>>>,
    default_ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<K, V, E> ExpiringCache<K, V, E>
where
    K: Eq + Hash,
    V: Clone + Send + 'static,
    E: Send + 'static,
{
    /// Creates a cache with default configuration.
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// Creates a cache with custom configuration.
    pub fn with_config(config: CacheConfig) -> Self {
        Self::with_config_and_clock(config, Arc::new(SystemClock))
    }

    /// Creates a cache on a custom clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self::with_config_and_clock(CacheConfig::default(), clock)
    }

    /// Creates a cache with custom configuration and clock.
    pub fn with_config_and_clock(config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            default_ttl: config.default_ttl(),
            clock,
        }
    }

    /// Registers `key`, replacing any existing entry.
    ///
    /// The new entry starts empty; its first read runs the refresher.
    pub fn add(&self, key: K, options: CachedObjectOptions<V, E>) {
        let object = CachedObject::build(options, self.default_ttl, Arc::clone(&self.clock));
        let ttl_ms = u64::try_from(object.ttl().as_millis()).unwrap_or(u64::MAX);
        debug!(ttl_ms, "Registered cached object");
        self.entries.insert(key, Arc::new(object));
    }

    /// Returns the value for `key`, refreshing it if needed.
    ///
    /// `None` means no entry is registered; it is returned on the first poll
    /// without running any refresher. `Some(Ok(None))` is a registered entry
    /// whose refresher produced no value.
    pub async fn get_value<Q>(&self, key: &Q) -> Option<std::result::Result<Option<V>, E>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(object) = self.get(key) else {
            debug!("No cached object registered");
            return None;
        };
        Some(object.get_value().await)
    }

    /// Returns true if `key` is registered.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Returns the object registered under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<Arc<CachedObject<V, E>>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key).map(|entry| Arc::clone(entry.value()))
    }

    /// Removes and returns the object registered under `key`.
    pub fn remove<Q>(&self, key: &Q) -> Option<Arc<CachedObject<V, E>>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.remove(key).map(|(_, object)| object)
    }

    /// Returns the registered keys.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.entries.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Returns the number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entries are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the TTL given to entries registered without one.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        let total = self.entries.len();
        let valid = self
            .entries
            .iter()
            .filter(|entry| entry.value().is_valid())
            .count();

        CacheStats {
            total_entries: total,
            valid_entries: valid,
            invalid_entries: total.saturating_sub(valid),
        }
    }
}

impl<K, V, E> Default for ExpiringCache<K, V, E>
where
    K: Eq + Hash,
    V: Clone + Send + 'static,
    E: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, E> fmt::Debug for ExpiringCache<K, V, E>
where
    K: Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpiringCache")
            .field("entries", &self.entries.len())
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}

/// Cache statistics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheStats {
    /// Registered entries
    pub total_entries: usize,
    /// Entries holding a value within its TTL
    pub valid_entries: usize,
    /// Entries that will refresh on their next read
    pub invalid_entries: usize,
}
