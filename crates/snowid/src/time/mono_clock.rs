use crate::{DEFAULT_EPOCH, TimeSource};
use core::time::Duration;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// A monotonic time source that returns elapsed time since construction,
/// offset from a user-defined epoch.
///
/// The wall clock is read exactly once, at construction, to align the clock
/// with the epoch. After that, time is measured with [`Instant`], so NTP or
/// manual adjustments to the system clock never make this clock go backward.
/// The trade-off is drift: a long-lived process slowly diverges from wall
/// time.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    start: Instant,
    epoch: Duration,
    offset: u64, // in milliseconds
}

impl Default for MonotonicClock {
    /// Constructs a monotonic clock aligned to [`DEFAULT_EPOCH`].
    fn default() -> Self {
        Self::with_epoch(DEFAULT_EPOCH)
    }
}

impl MonotonicClock {
    /// Constructs a monotonic clock using `epoch` as its origin (t = 0),
    /// specified as a [`Duration`] since the Unix epoch.
    ///
    /// If the system clock reads earlier than `epoch` at construction, the
    /// clock starts at zero.
    ///
    /// # Example
    ///
    /// ```
    /// use snowid::{MonotonicClock, TimeSource};
    ///
    /// let clock = MonotonicClock::default();
    /// let a = clock.current_millis();
    /// let b = clock.current_millis();
    /// assert!(b >= a);
    /// ```
    #[must_use]
    pub fn with_epoch(epoch: Duration) -> Self {
        let start = Instant::now();
        let system_now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        let offset = u64::try_from(system_now.saturating_sub(epoch).as_millis()).unwrap_or(u64::MAX);

        Self {
            start,
            epoch,
            offset,
        }
    }
}

impl TimeSource for MonotonicClock {
    fn current_millis(&self) -> u64 {
        let elapsed = u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.offset.saturating_add(elapsed)
    }

    fn epoch(&self) -> Duration {
        self.epoch
    }
}
