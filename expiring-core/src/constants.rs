//! Constants shared by the expiring cache crates.

use std::time::Duration;

// ═══════════════════════════════════════════════════════════════════════════════
// EXPIRY
// ═══════════════════════════════════════════════════════════════════════════════

/// Default time-to-live for a cached value, in milliseconds (12 hours).
pub const DEFAULT_TTL_MS: u64 = 12 * 60 * 60 * 1000;

/// Default time-to-live for a cached value.
pub const DEFAULT_TTL: Duration = Duration::from_millis(DEFAULT_TTL_MS);

/// Timestamp held by a slot that has never been refreshed.
/// The Unix epoch itself, in milliseconds.
pub const NEVER_UPDATED: i64 = 0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ttl_is_twelve_hours() {
        assert_eq!(DEFAULT_TTL.as_secs(), 12 * 3600);
        assert_eq!(DEFAULT_TTL.as_millis(), DEFAULT_TTL_MS as u128);
    }
}
