use crate::SnowflakeId;

/// The result of a single non-blocking generation attempt.
///
/// Returned by [`SnowflakeGenerator::try_poll_id`]:
///
/// - [`IdGenStatus::Ready`] indicates a new ID was successfully generated.
/// - [`IdGenStatus::Pending`] means the sequence is exhausted for the current
///   millisecond and no ID can be issued until the clock reaches
///   `yield_until`.
///
/// This allows callers to drive their own backoff instead of blocking inside
/// [`SnowflakeGenerator::next_id`].
///
/// [`SnowflakeGenerator::try_poll_id`]: crate::SnowflakeGenerator::try_poll_id
/// [`SnowflakeGenerator::next_id`]: crate::SnowflakeGenerator::next_id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdGenStatus<ID: SnowflakeId> {
    /// A unique ID was generated and is ready to use.
    Ready {
        /// The generated Snowflake ID.
        id: ID,
    },
    /// No ID could be generated because the sequence has been exhausted for
    /// the current millisecond.
    Pending {
        /// The next timestamp (inclusive) at which generation may resume.
        yield_until: u64,
    },
}
