/// Defines a 64-bit Snowflake ID type with a custom bit layout.
///
/// Fields are packed most significant first: reserved, timestamp, datacenter,
/// worker, sequence. The widths must add up to 64 and at least one bit must
/// be reserved, so every ID stays a non-negative `i64` as well. Both rules are
/// checked at compile time. Give `datacenter` zero bits for a single-segment
/// layout.
///
/// ```text
///  Bit Index:  63                                                          0
///              +----------+-----------+------------+--------+----------+
///  Field:      | reserved | timestamp | datacenter | worker | sequence |
///              +----------+-----------+------------+--------+----------+
///              |<-- MSB ------------- 64 bits --------------- LSB --->|
/// ```
///
/// # Example
///
/// ```
/// use snowid::define_snowflake_id;
///
/// define_snowflake_id!(
///     /// 39 bits of timestamp, 16 bits of worker, 8 bits of sequence.
///     SonyflakeLikeId,
///     reserved: 1,
///     timestamp: 39,
///     datacenter: 0,
///     worker: 16,
///     sequence: 8
/// );
///
/// let id = SonyflakeLikeId::from(7, 0, 513, 3);
/// assert_eq!(id.worker_id(), 513);
/// assert_eq!(SonyflakeLikeId::max_sequence(), 255);
/// ```
#[macro_export]
macro_rules! define_snowflake_id {
    (
        $(#[$meta:meta])*
        $name:ident,
        reserved: $reserved_bits:expr,
        timestamp: $timestamp_bits:expr,
        datacenter: $datacenter_bits:expr,
        worker: $worker_bits:expr,
        sequence: $sequence_bits:expr
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        pub struct $name {
            id: u64,
        }

        const _: () = {
            // Compile-time check: total bit width _must_ equal the backing
            // type, and the sign bit is never used.
            assert!(
                $reserved_bits
                    + $timestamp_bits
                    + $datacenter_bits
                    + $worker_bits
                    + $sequence_bits
                    == u64::BITS,
                "Layout must match underlying type width"
            );
            assert!($reserved_bits >= 1, "Layout must reserve the sign bit");
        };

        impl $name {
            pub const RESERVED_BITS: u32 = $reserved_bits;
            pub const TIMESTAMP_BITS: u32 = $timestamp_bits;
            pub const DATACENTER_BITS: u32 = $datacenter_bits;
            pub const WORKER_BITS: u32 = $worker_bits;
            pub const SEQUENCE_BITS: u32 = $sequence_bits;

            pub const SEQUENCE_SHIFT: u32 = 0;
            pub const WORKER_SHIFT: u32 = Self::SEQUENCE_SHIFT + Self::SEQUENCE_BITS;
            pub const DATACENTER_SHIFT: u32 = Self::WORKER_SHIFT + Self::WORKER_BITS;
            pub const TIMESTAMP_SHIFT: u32 = Self::DATACENTER_SHIFT + Self::DATACENTER_BITS;
            pub const RESERVED_SHIFT: u32 = Self::TIMESTAMP_SHIFT + Self::TIMESTAMP_BITS;

            pub const TIMESTAMP_MASK: u64 = (1 << Self::TIMESTAMP_BITS) - 1;
            pub const DATACENTER_MASK: u64 = (1 << Self::DATACENTER_BITS) - 1;
            pub const WORKER_MASK: u64 = (1 << Self::WORKER_BITS) - 1;
            pub const SEQUENCE_MASK: u64 = (1 << Self::SEQUENCE_BITS) - 1;

            /// Packs the components into an ID, masking each to its width.
            #[must_use]
            pub const fn from(
                timestamp: u64,
                datacenter_id: u64,
                worker_id: u64,
                sequence: u64,
            ) -> Self {
                let t = (timestamp & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
                let d = (datacenter_id & Self::DATACENTER_MASK) << Self::DATACENTER_SHIFT;
                let w = (worker_id & Self::WORKER_MASK) << Self::WORKER_SHIFT;
                let s = (sequence & Self::SEQUENCE_MASK) << Self::SEQUENCE_SHIFT;
                Self { id: t | d | w | s }
            }

            /// Extracts the timestamp from the packed ID.
            #[must_use]
            pub const fn timestamp(&self) -> u64 {
                (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
            }

            /// Extracts the datacenter ID from the packed ID.
            #[must_use]
            pub const fn datacenter_id(&self) -> u64 {
                (self.id >> Self::DATACENTER_SHIFT) & Self::DATACENTER_MASK
            }

            /// Extracts the worker ID from the packed ID.
            #[must_use]
            pub const fn worker_id(&self) -> u64 {
                (self.id >> Self::WORKER_SHIFT) & Self::WORKER_MASK
            }

            /// Extracts the sequence number from the packed ID.
            #[must_use]
            pub const fn sequence(&self) -> u64 {
                (self.id >> Self::SEQUENCE_SHIFT) & Self::SEQUENCE_MASK
            }

            #[must_use]
            pub const fn max_timestamp() -> u64 {
                Self::TIMESTAMP_MASK
            }

            #[must_use]
            pub const fn max_datacenter_id() -> u64 {
                Self::DATACENTER_MASK
            }

            #[must_use]
            pub const fn max_worker_id() -> u64 {
                Self::WORKER_MASK
            }

            #[must_use]
            pub const fn max_sequence() -> u64 {
                Self::SEQUENCE_MASK
            }

            /// Converts this type into its raw integer representation.
            #[must_use]
            pub const fn to_raw(&self) -> u64 {
                self.id
            }

            /// Converts a raw integer into this type.
            #[must_use]
            pub const fn from_raw(raw: u64) -> Self {
                Self { id: raw }
            }

            /// Returns `true` if none of the reserved bits are set.
            #[must_use]
            pub const fn is_valid(&self) -> bool {
                (self.id >> Self::RESERVED_SHIFT) == 0
            }

            /// Returns the ID as a zero-padded 20-digit string, which sorts
            /// lexicographically in the same order as the integers.
            #[must_use]
            pub fn to_padded_string(&self) -> ::std::string::String {
                ::std::format!("{:020}", self.id)
            }
        }

        impl $crate::SnowflakeId for $name {
            fn timestamp(&self) -> u64 {
                self.timestamp()
            }

            fn max_timestamp() -> u64 {
                Self::max_timestamp()
            }

            fn datacenter_id(&self) -> u64 {
                self.datacenter_id()
            }

            fn max_datacenter_id() -> u64 {
                Self::max_datacenter_id()
            }

            fn worker_id(&self) -> u64 {
                self.worker_id()
            }

            fn max_worker_id() -> u64 {
                Self::max_worker_id()
            }

            fn sequence(&self) -> u64 {
                self.sequence()
            }

            fn max_sequence() -> u64 {
                Self::max_sequence()
            }

            fn from_components(
                timestamp: u64,
                datacenter_id: u64,
                worker_id: u64,
                sequence: u64,
            ) -> Self {
                debug_assert!(timestamp <= Self::TIMESTAMP_MASK, "timestamp overflow");
                debug_assert!(datacenter_id <= Self::DATACENTER_MASK, "datacenter_id overflow");
                debug_assert!(worker_id <= Self::WORKER_MASK, "worker_id overflow");
                debug_assert!(sequence <= Self::SEQUENCE_MASK, "sequence overflow");
                Self::from(timestamp, datacenter_id, worker_id, sequence)
            }

            fn to_raw(&self) -> u64 {
                self.to_raw()
            }

            fn from_raw(raw: u64) -> Self {
                Self::from_raw(raw)
            }

            fn is_valid(&self) -> bool {
                self.is_valid()
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::write!(f, "{}", self.id)
            }
        }

        impl ::core::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                let mut s = f.debug_struct(::core::stringify!($name));
                s.field("raw", &self.id);
                s.field("timestamp", &self.timestamp());
                if Self::DATACENTER_BITS > 0 {
                    s.field("datacenter_id", &self.datacenter_id());
                }
                s.field("worker_id", &self.worker_id());
                s.field("sequence", &self.sequence());
                s.finish()
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::ParseIdError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                let raw: u64 = s.trim().parse()?;
                let id = Self::from_raw(raw);
                if id.is_valid() {
                    Ok(id)
                } else {
                    Err($crate::ParseIdError::ReservedBitsSet { raw })
                }
            }
        }

        impl ::core::convert::From<$name> for u64 {
            fn from(id: $name) -> u64 {
                id.to_raw()
            }
        }

        $crate::cfg_serde! {
            impl $crate::__serde::Serialize for $name {
                fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
                where
                    S: $crate::__serde::Serializer,
                {
                    serializer.serialize_u64(self.id)
                }
            }

            impl<'de> $crate::__serde::Deserialize<'de> for $name {
                fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
                where
                    D: $crate::__serde::Deserializer<'de>,
                {
                    let raw = <u64 as $crate::__serde::Deserialize>::deserialize(deserializer)?;
                    let id = Self::from_raw(raw);
                    if !id.is_valid() {
                        return Err(<D::Error as $crate::__serde::de::Error>::custom(
                            $crate::ParseIdError::ReservedBitsSet { raw },
                        ));
                    }
                    Ok(id)
                }
            }
        }
    };
}

define_snowflake_id!(
    /// A 64-bit Snowflake ID with a single 10-bit worker segment.
    ///
    /// - 1 bit reserved
    /// - 41 bits timestamp (ms since the clock's epoch, ~69 years)
    /// - 10 bits worker ID (0..=1023)
    /// - 12 bits sequence (4096 IDs per millisecond per worker)
    ///
    /// ```text
    ///  Bit Index:  63           63 62            22 21             12 11             0
    ///              +--------------+----------------+-----------------+---------------+
    ///  Field:      | reserved (1) | timestamp (41) | worker ID (10)  | sequence (12) |
    ///              +--------------+----------------+-----------------+---------------+
    ///              |<----------- MSB ---------- 64 bits ----------- LSB ------------>|
    /// ```
    SnowflakeWorkerId,
    reserved: 1,
    timestamp: 41,
    datacenter: 0,
    worker: 10,
    sequence: 12
);

define_snowflake_id!(
    /// A 64-bit Snowflake ID that splits the identifier into datacenter and
    /// worker segments.
    ///
    /// - 1 bit reserved
    /// - 41 bits timestamp (ms since the clock's epoch)
    /// - 5 bits datacenter ID (0..=31)
    /// - 5 bits worker ID (0..=31)
    /// - 12 bits sequence
    ///
    /// ```text
    ///  Bit Index:  63      63 62          22 21              17 16          12 11             0
    ///              +---------+--------------+------------------+--------------+---------------+
    ///  Field:      | rsv (1) | timestamp(41)| datacenter ID (5)| worker ID (5)| sequence (12) |
    ///              +---------+--------------+------------------+--------------+---------------+
    ///              |<----------------- MSB ----------- 64 bits ---------- LSB --------------->|
    /// ```
    SnowflakeDatacenterId,
    reserved: 1,
    timestamp: 41,
    datacenter: 5,
    worker: 5,
    sequence: 12
);
