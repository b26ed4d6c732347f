/// A result type whose error defaults to [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Every failure `snowid` can report.
///
/// The generator's lock is a `parking_lot` mutex, which never poisons, so
/// runtime failures all come from the clock: it regressed, it stalled inside
/// an exhausted millisecond, or it ran past the layout's timestamp field.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A worker or datacenter identifier does not fit in its bit field, or
    /// the clock reads past the largest timestamp the layout can hold.
    #[error("invalid {field}: {value} (must be between 0 and {max})")]
    InvalidIdentifier {
        /// Which value was rejected (`"worker_id"`, `"datacenter_id"`,
        /// `"timestamp"`, or `"sequence"` when restoring state).
        field: &'static str,
        /// The rejected value.
        value: u64,
        /// The largest value the layout accepts.
        max: u64,
    },

    /// The clock reported a time earlier than the last issued timestamp.
    ///
    /// The generator refuses to issue an ID in this state since it could
    /// break ordering or collide with an ID already handed out.
    #[error("clock moved backward: last issued at {last}ms, clock reads {now}ms")]
    ClockMovedBackward {
        /// Timestamp of the last issued ID, in milliseconds since the epoch.
        last: u64,
        /// The regressed clock reading, in milliseconds since the epoch.
        now: u64,
    },

    /// Every sequence value of a millisecond was issued and the clock did
    /// not advance within [`GeneratorConfig::exhaustion_retries`] samples.
    ///
    /// [`GeneratorConfig::exhaustion_retries`]: crate::GeneratorConfig::exhaustion_retries
    #[error("sequence exhausted at {timestamp}ms: clock did not advance after {retries} retries")]
    SequenceExhausted {
        /// The exhausted millisecond, relative to the epoch.
        timestamp: u64,
        /// Clock samples taken after the first one.
        retries: u32,
    },
}
