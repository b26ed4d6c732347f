use core::num::ParseIntError;

/// Failure to parse the decimal form of a Snowflake ID.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseIdError {
    /// The input is not a decimal `u64`.
    #[error("not a decimal integer: {0}")]
    NotAnInteger(#[from] ParseIntError),

    /// The integer sets bits the layout reserves.
    #[error("reserved bits set in {raw}")]
    ReservedBitsSet {
        /// The rejected value.
        raw: u64,
    },
}
