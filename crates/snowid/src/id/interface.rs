use core::{fmt, hash::Hash, time::Duration};

/// A 64-bit Snowflake layout with timestamp, datacenter, worker, and sequence
/// fields, most significant first.
///
/// Single-segment layouts give the datacenter field zero bits; its value and
/// maximum are then always `0`.
///
/// Implementations are normally produced by [`define_snowflake_id!`].
///
/// # Example
///
/// ```
/// use snowid::{SnowflakeDatacenterId, SnowflakeId};
///
/// let id = SnowflakeDatacenterId::from_components(1000, 3, 2, 1);
/// assert_eq!(id.timestamp(), 1000);
/// assert_eq!(id.datacenter_id(), 3);
/// assert_eq!(id.worker_id(), 2);
/// assert_eq!(id.sequence(), 1);
/// ```
///
/// [`define_snowflake_id!`]: crate::define_snowflake_id
pub trait SnowflakeId:
    Sized + Copy + Clone + fmt::Display + fmt::Debug + PartialOrd + Ord + PartialEq + Eq + Hash
{
    /// Returns the timestamp portion of the ID.
    fn timestamp(&self) -> u64;

    /// Returns the maximum possible value for the timestamp field.
    fn max_timestamp() -> u64;

    /// Returns the datacenter ID portion of the ID.
    fn datacenter_id(&self) -> u64;

    /// Returns the maximum possible value for the datacenter field.
    fn max_datacenter_id() -> u64;

    /// Returns the worker ID portion of the ID.
    fn worker_id(&self) -> u64;

    /// Returns the maximum possible value for the worker field.
    fn max_worker_id() -> u64;

    /// Returns the sequence portion of the ID.
    fn sequence(&self) -> u64;

    /// Returns the maximum possible value for the sequence field.
    fn max_sequence() -> u64;

    /// Packs the components into an ID. Components are masked to their field
    /// width.
    fn from_components(timestamp: u64, datacenter_id: u64, worker_id: u64, sequence: u64)
    -> Self;

    /// Converts this type into its raw integer representation.
    fn to_raw(&self) -> u64;

    /// Converts a raw integer into this type.
    fn from_raw(raw: u64) -> Self;

    /// Returns `true` if none of the reserved bits are set.
    fn is_valid(&self) -> bool;

    /// Returns true if the current sequence value can be incremented.
    fn has_sequence_room(&self) -> bool {
        self.sequence() < Self::max_sequence()
    }

    /// Returns a new ID with the sequence incremented.
    fn increment_sequence(&self) -> Self {
        Self::from_components(
            self.timestamp(),
            self.datacenter_id(),
            self.worker_id(),
            self.sequence() + 1,
        )
    }

    /// Returns a new ID for a newer timestamp with sequence reset to zero.
    fn rollover_to_timestamp(&self, ts: u64) -> Self {
        Self::from_components(ts, self.datacenter_id(), self.worker_id(), 0)
    }

    /// Returns the creation time in milliseconds since the Unix epoch, given
    /// the epoch the ID was generated against.
    fn unix_millis(&self, epoch: Duration) -> u64 {
        let epoch = u64::try_from(epoch.as_millis()).unwrap_or(u64::MAX);
        epoch.saturating_add(self.timestamp())
    }
}
