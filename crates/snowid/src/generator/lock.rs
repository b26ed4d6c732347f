use std::sync::Arc;
use core::{cmp::Ordering, time::Duration};

use parking_lot::{Mutex, MutexGuard};
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    ClockBackwardPolicy, Error, GeneratorConfig, IdGenStatus, Result, SnowflakeId, SystemClock,
    TimeSource,
};

/// The last issued ID, or `None` if the generator has never issued one.
type State<ID> = Option<ID>;

/// A lock-based Snowflake ID generator suitable for multi-threaded
/// environments.
///
/// All mutable state (the last issued timestamp and sequence) lives behind a
/// single [`Mutex`] that is held for the whole of [`Self::next_id`]: the clock
/// read, the sequence update, and the packing happen as one critical section.
/// Cloning the generator shares that state, so clones never issue the same ID.
///
/// The bit layout comes from `ID` and the epoch from the [`TimeSource`].
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Safely implement any [`SnowflakeId`] layout
/// - ✅ Detects a regressed clock instead of issuing out-of-order IDs
///
/// # Example
/// ```
/// use snowid::{SnowflakeGenerator, SnowflakeWorkerId, SystemClock};
///
/// let generator = SnowflakeGenerator::<SnowflakeWorkerId, _>::new(7, SystemClock::default())?;
///
/// let a = generator.next_id()?;
/// let b = generator.next_id()?;
/// assert!(a < b);
/// assert_eq!(a.worker_id(), 7);
/// # Ok::<(), snowid::Error>(())
/// ```
pub struct SnowflakeGenerator<ID, T = SystemClock>
where
    ID: SnowflakeId,
    T: TimeSource,
{
    #[cfg(feature = "cache-padded")]
    state: Arc<crossbeam_utils::CachePadded<Mutex<State<ID>>>>,
    #[cfg(not(feature = "cache-padded"))]
    state: Arc<Mutex<State<ID>>>,
    datacenter_id: u64,
    worker_id: u64,
    config: GeneratorConfig,
    time: T,
}

impl<ID, T> SnowflakeGenerator<ID, T>
where
    ID: SnowflakeId,
    T: TimeSource,
{
    /// Creates a generator for a single-segment layout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`] if `worker_id` exceeds
    /// `ID::max_worker_id()`.
    pub fn new(worker_id: u64, time: T) -> Result<Self> {
        Self::with_datacenter(0, worker_id, time)
    }

    /// Creates a generator for a layout with both datacenter and worker
    /// segments.
    ///
    /// For layouts without a datacenter field only `datacenter_id = 0` is
    /// accepted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`] if either identifier exceeds its
    /// field.
    ///
    /// # Example
    /// ```
    /// use snowid::{Error, SnowflakeDatacenterId, SnowflakeGenerator, SystemClock};
    ///
    /// type Generator = SnowflakeGenerator<SnowflakeDatacenterId, SystemClock>;
    ///
    /// assert!(Generator::with_datacenter(31, 31, SystemClock::default()).is_ok());
    /// assert_eq!(
    ///     Generator::with_datacenter(32, 0, SystemClock::default()).err(),
    ///     Some(Error::InvalidIdentifier { field: "datacenter_id", value: 32, max: 31 }),
    /// );
    /// ```
    pub fn with_datacenter(datacenter_id: u64, worker_id: u64, time: T) -> Result<Self> {
        Self::validate(datacenter_id, worker_id)?;
        Ok(Self::from_state(None, datacenter_id, worker_id, time))
    }

    /// Creates a generator that behaves as if it had just issued the ID made
    /// of the given components.
    ///
    /// This is useful for restoring state or for controlling the starting
    /// point of the generator manually. In typical use, prefer [`Self::new`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`] if any component exceeds its
    /// field.
    pub fn from_components(
        timestamp: u64,
        datacenter_id: u64,
        worker_id: u64,
        sequence: u64,
        time: T,
    ) -> Result<Self> {
        Self::validate(datacenter_id, worker_id)?;
        check_range("timestamp", timestamp, ID::max_timestamp())?;
        check_range("sequence", sequence, ID::max_sequence())?;

        let last = ID::from_components(timestamp, datacenter_id, worker_id, sequence);
        Ok(Self::from_state(Some(last), datacenter_id, worker_id, time))
    }

    /// Replaces the wait tuning.
    #[must_use]
    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    fn validate(datacenter_id: u64, worker_id: u64) -> Result<()> {
        check_range("datacenter_id", datacenter_id, ID::max_datacenter_id())?;
        check_range("worker_id", worker_id, ID::max_worker_id())
    }

    fn from_state(last: State<ID>, datacenter_id: u64, worker_id: u64, time: T) -> Self {
        Self {
            #[cfg(feature = "cache-padded")]
            state: Arc::new(crossbeam_utils::CachePadded::new(Mutex::new(last))),
            #[cfg(not(feature = "cache-padded"))]
            state: Arc::new(Mutex::new(last)),
            datacenter_id,
            worker_id,
            config: GeneratorConfig::default(),
            time,
        }
    }

    /// The worker identifier packed into every ID.
    pub fn worker_id(&self) -> u64 {
        self.worker_id
    }

    /// The datacenter identifier packed into every ID (`0` for
    /// single-segment layouts).
    pub fn datacenter_id(&self) -> u64 {
        self.datacenter_id
    }

    /// The wait tuning in effect.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// The underlying time source.
    pub fn time(&self) -> &T {
        &self.time
    }

    /// The epoch of the underlying time source.
    pub fn epoch(&self) -> Duration {
        self.time.epoch()
    }

    /// The most recently issued ID, if any.
    pub fn last_issued(&self) -> Option<ID> {
        *self.lock()
    }

    /// Generates the next ID, blocking while the current millisecond's
    /// sequence is exhausted.
    ///
    /// Waits re-sample the clock every [`GeneratorConfig::poll_interval`]
    /// until it advances, so the block is normally well under a millisecond.
    /// At most [`GeneratorConfig::exhaustion_retries`] samples are taken.
    ///
    /// # Errors
    ///
    /// - [`Error::ClockMovedBackward`] if the clock reads earlier than the
    ///   last issued timestamp and the [`ClockBackwardPolicy`] does not allow
    ///   (or runs out of) waiting for it to catch up.
    /// - [`Error::SequenceExhausted`] if the clock does not advance past an
    ///   exhausted millisecond within the retry limit.
    /// - [`Error::InvalidIdentifier`] with `field = "timestamp"` if the clock
    ///   reads past the layout's largest timestamp.
    ///
    /// The generator's state is left untouched on every error.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_id(&self) -> Result<ID> {
        let mut state = self.lock();
        let mut backward_retries = 0;
        let mut exhausted_retries = 0;

        let err = loop {
            let now = self.time.current_millis();
            match self.step(&mut state, now) {
                Ok(IdGenStatus::Ready { id }) => return Ok(id),
                Ok(IdGenStatus::Pending { yield_until }) => {
                    if exhausted_retries >= self.config.exhaustion_retries {
                        break Error::SequenceExhausted {
                            timestamp: yield_until - 1,
                            retries: exhausted_retries,
                        };
                    }
                    #[cfg(feature = "tracing")]
                    tracing::trace!(yield_until, "sequence exhausted, waiting for next millisecond");
                    exhausted_retries += 1;
                    self.config.pause();
                }
                Err(err @ Error::ClockMovedBackward { .. }) => match self.config.on_clock_backward {
                    ClockBackwardPolicy::Wait { max_retries } if backward_retries < max_retries => {
                        backward_retries += 1;
                        self.config.pause();
                    }
                    _ => break err,
                },
                Err(err) => break err,
            }
        };

        #[cfg(feature = "tracing")]
        tracing::warn!(%err, backward_retries, exhausted_retries, "refusing to issue id");
        Err(err)
    }

    /// Attempts to generate the next ID without blocking.
    ///
    /// Returns [`IdGenStatus::Pending`] when the sequence for the current
    /// millisecond is exhausted, leaving the backoff to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockMovedBackward`] if the clock reads earlier than
    /// the last issued timestamp, regardless of the configured
    /// [`ClockBackwardPolicy`], and [`Error::InvalidIdentifier`] if the clock
    /// reads past the layout's largest timestamp.
    ///
    /// # Example
    /// ```
    /// use snowid::{IdGenStatus, SnowflakeGenerator, SnowflakeWorkerId, SystemClock};
    ///
    /// let generator = SnowflakeGenerator::<SnowflakeWorkerId, _>::new(0, SystemClock::default())?;
    ///
    /// let id = loop {
    ///     match generator.try_poll_id()? {
    ///         IdGenStatus::Ready { id } => break id,
    ///         IdGenStatus::Pending { .. } => std::thread::yield_now(),
    ///     }
    /// };
    /// assert_eq!(id.sequence(), 0);
    /// # Ok::<(), snowid::Error>(())
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_poll_id(&self) -> Result<IdGenStatus<ID>> {
        let mut state = self.lock();
        let now = self.time.current_millis();
        self.step(&mut state, now)
    }

    /// One generation step against an already locked state.
    fn step(&self, state: &mut State<ID>, now: u64) -> Result<IdGenStatus<ID>> {
        // A masked timestamp would wrap around and reissue old IDs.
        check_range("timestamp", now, ID::max_timestamp())?;

        let Some(last) = *state else {
            let id = ID::from_components(now, self.datacenter_id, self.worker_id, 0);
            *state = Some(id);
            return Ok(IdGenStatus::Ready { id });
        };

        let last_ts = last.timestamp();
        match now.cmp(&last_ts) {
            Ordering::Equal => {
                if last.has_sequence_room() {
                    let id = last.increment_sequence();
                    *state = Some(id);
                    Ok(IdGenStatus::Ready { id })
                } else {
                    Ok(IdGenStatus::Pending {
                        yield_until: last_ts + 1,
                    })
                }
            }
            Ordering::Greater => {
                let id = last.rollover_to_timestamp(now);
                *state = Some(id);
                Ok(IdGenStatus::Ready { id })
            }
            Ordering::Less => Err(Self::cold_clock_behind(last_ts, now)),
        }
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(last: u64, now: u64) -> Error {
        Error::ClockMovedBackward { last, now }
    }

    fn lock(&self) -> MutexGuard<'_, State<ID>> {
        self.state.lock()
    }
}

impl<ID, T> Clone for SnowflakeGenerator<ID, T>
where
    ID: SnowflakeId,
    T: TimeSource + Clone,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            datacenter_id: self.datacenter_id,
            worker_id: self.worker_id,
            config: self.config,
            time: self.time.clone(),
        }
    }
}

impl<ID, T> core::fmt::Debug for SnowflakeGenerator<ID, T>
where
    ID: SnowflakeId,
    T: TimeSource,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SnowflakeGenerator")
            .field("datacenter_id", &self.datacenter_id)
            .field("worker_id", &self.worker_id)
            .field("epoch", &self.time.epoch())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn check_range(field: &'static str, value: u64, max: u64) -> Result<()> {
    if value > max {
        return Err(Error::InvalidIdentifier { field, value, max });
    }
    Ok(())
}
