//! # Expiring Cache
//!
//! Lazily refreshing, time-expiring values keyed by an identifier.
//!
//! Register a key with a refresh function and a TTL; reads return the cached
//! value while it is fresh and call the refresh function otherwise.
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use expiring_cache::{CachedObjectOptions, ExpiringCache};
//!
//! # tokio_test::block_on(async {
//! let cache: ExpiringCache<&str, String, String> = ExpiringCache::new();
//!
//! cache.add(
//!     "weather",
//!     CachedObjectOptions::new()
//!         .with_ttl(Duration::from_secs(60))
//!         .with_refresh(|| async { Ok::<_, String>(Some("sunny".to_string())) }),
//! );
//!
//! assert_eq!(cache.get_value("weather").await, Some(Ok(Some("sunny".to_string()))));
//! assert_eq!(cache.get_value("unknown").await, None);
//! # });
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod cache;
mod object;

pub use cache::{CacheConfig, CacheStats, ExpiringCache};
pub use object::{CachedObject, CachedObjectOptions};

pub use expiring_core::{CacheError, Clock, ManualClock, Refresh, SystemClock};
