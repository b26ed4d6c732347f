use core::time::Duration;

/// Default epoch: Saturday, October 25, 2014 05:06:02.373 UTC
pub const DEFAULT_EPOCH: Duration = Duration::from_millis(1_414_213_562_373);

/// Twitter epoch: Thursday, November 4, 2010 1:42:54.657 UTC
pub const TWITTER_EPOCH: Duration = Duration::from_millis(1_288_834_974_657);

/// Discord epoch: Thursday, January 1, 2015 00:00:00 UTC
pub const DISCORD_EPOCH: Duration = Duration::from_millis(1_420_070_400_000);

/// Standard UNIX epoch: Thursday, January 1, 1970 00:00:00 UTC
pub const UNIX_EPOCH_MILLIS: Duration = Duration::from_millis(0);

/// A source of millisecond timestamps relative to a fixed epoch.
///
/// This abstraction allows you to plug in the system wall clock, a monotonic
/// timer, or a mocked time source in tests.
///
/// # Example
///
/// ```
/// use snowid::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis(), 1234);
/// assert_eq!(time.epoch(), snowid::DEFAULT_EPOCH);
/// ```
pub trait TimeSource {
    /// Returns the current time in milliseconds since [`TimeSource::epoch`].
    fn current_millis(&self) -> u64;

    /// The origin (t = 0) of this clock, as a [`Duration`] since 1970-01-01
    /// UTC.
    ///
    /// Changing the epoch after IDs have been issued breaks comparability
    /// between old and new IDs.
    fn epoch(&self) -> Duration {
        DEFAULT_EPOCH
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }

    fn epoch(&self) -> Duration {
        (**self).epoch()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for std::sync::Arc<T> {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }

    fn epoch(&self) -> Duration {
        (**self).epoch()
    }
}
