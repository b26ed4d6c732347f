use core::time::Duration;

/// How often waits re-sample the clock unless configured otherwise.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_micros(100);

/// How many times a wait on an exhausted millisecond re-samples the clock
/// unless configured otherwise. With [`DEFAULT_POLL_INTERVAL`] that is at
/// least one second.
pub const DEFAULT_EXHAUSTION_RETRIES: u32 = 10_000;

/// What [`SnowflakeGenerator::next_id`] does when the clock reads earlier
/// than the last issued timestamp.
///
/// Neither policy ever issues an ID that could break ordering.
///
/// [`SnowflakeGenerator::next_id`]: crate::SnowflakeGenerator::next_id
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ClockBackwardPolicy {
    /// Return [`Error::ClockMovedBackward`] immediately.
    ///
    /// [`Error::ClockMovedBackward`]: crate::Error::ClockMovedBackward
    #[default]
    FailFast,
    /// Re-sample the clock up to `max_retries` times, one poll interval
    /// apart, and fail only if it has still not caught up.
    Wait {
        /// Number of extra clock samples before giving up.
        max_retries: u32,
    },
}

/// Runtime tuning for a [`SnowflakeGenerator`].
///
/// The bit layout and epoch are not part of this: the layout is fixed by the
/// ID type and the epoch by the [`TimeSource`].
///
/// # Example
///
/// ```
/// use core::time::Duration;
/// use snowid::{ClockBackwardPolicy, GeneratorConfig};
///
/// let config = GeneratorConfig::default()
///     .poll_interval(Duration::from_micros(50))
///     .on_clock_backward(ClockBackwardPolicy::Wait { max_retries: 40 })
///     .exhaustion_retries(200);
///
/// assert_eq!(config.max_backward_wait(), Duration::from_millis(2));
/// assert_eq!(config.max_exhaustion_wait(), Duration::from_millis(10));
/// ```
///
/// [`SnowflakeGenerator`]: crate::SnowflakeGenerator
/// [`TimeSource`]: crate::TimeSource
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeneratorConfig {
    /// Pause between clock samples while waiting. Zero spins instead of
    /// sleeping.
    pub poll_interval: Duration,
    /// Reaction to a regressed clock.
    pub on_clock_backward: ClockBackwardPolicy,
    /// Clock samples allowed while waiting out an exhausted millisecond
    /// before failing with [`Error::SequenceExhausted`]. Scale it up when
    /// spinning, since each spin is far shorter than a millisecond.
    ///
    /// [`Error::SequenceExhausted`]: crate::Error::SequenceExhausted
    pub exhaustion_retries: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            on_clock_backward: ClockBackwardPolicy::FailFast,
            exhaustion_retries: DEFAULT_EXHAUSTION_RETRIES,
        }
    }
}

impl GeneratorConfig {
    #[must_use]
    pub const fn poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    #[must_use]
    pub const fn on_clock_backward(mut self, policy: ClockBackwardPolicy) -> Self {
        self.on_clock_backward = policy;
        self
    }

    #[must_use]
    pub const fn exhaustion_retries(mut self, retries: u32) -> Self {
        self.exhaustion_retries = retries;
        self
    }

    /// Upper bound on how long `next_id` may block on an exhausted
    /// millisecond before failing, not counting clock reads.
    #[must_use]
    pub fn max_exhaustion_wait(&self) -> Duration {
        self.poll_interval
            .checked_mul(self.exhaustion_retries)
            .unwrap_or(Duration::MAX)
    }

    /// Upper bound on how long `next_id` may block on a regressed clock
    /// before failing.
    #[must_use]
    pub fn max_backward_wait(&self) -> Duration {
        match self.on_clock_backward {
            ClockBackwardPolicy::FailFast => Duration::ZERO,
            ClockBackwardPolicy::Wait { max_retries } => self
                .poll_interval
                .checked_mul(max_retries)
                .unwrap_or(Duration::MAX),
        }
    }

    /// Blocks for one poll interval.
    pub(crate) fn pause(&self) {
        if self.poll_interval.is_zero() {
            core::hint::spin_loop();
        } else {
            std::thread::sleep(self.poll_interval);
        }
    }
}
