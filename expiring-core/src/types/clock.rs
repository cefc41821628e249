//! Clock implementations.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use chrono::Utc;

use crate::traits::Clock;

/// Real wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock that only moves when told to.
///
/// Lets tests step past a TTL without sleeping.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    /// Creates a clock reading `start_millis`.
    pub fn new(start_millis: i64) -> Self {
        Self {
            now: AtomicI64::new(start_millis),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: Duration) {
        let millis = i64::try_from(by.as_millis()).unwrap_or(i64::MAX);
        self.now
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |now| {
                Some(now.saturating_add(millis))
            })
            .ok();
    }

    /// Sets the clock to an absolute reading.
    pub fn set(&self, millis: i64) {
        self.now.store(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_after_epoch() {
        let before = Utc::now().timestamp_millis();
        let now = SystemClock.now_millis();
        assert!(now >= before);
        assert!(now > crate::constants::NEVER_UPDATED);
    }

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::new(100);
        clock.advance(Duration::from_millis(250));
        assert_eq!(clock.now_millis(), 350);

        clock.advance(Duration::from_secs(1));
        assert_eq!(clock.now_millis(), 1_350);
    }

    #[test]
    fn test_manual_clock_set() {
        let clock = ManualClock::default();
        assert_eq!(clock.now_millis(), 0);

        clock.set(42);
        assert_eq!(clock.now_millis(), 42);
    }

    #[test]
    fn test_manual_clock_saturates() {
        let clock = ManualClock::new(i64::MAX - 1);
        clock.advance(Duration::from_millis(10));
        assert_eq!(clock.now_millis(), i64::MAX);
    }
}
