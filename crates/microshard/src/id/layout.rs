use crate::{Error, Result, ShardId};
use core::cmp::Ordering;
use core::fmt;

/// Largest timestamp representable in the 54-bit time field (2^54 - 1
/// microseconds, late 2540).
pub const MAX_TIMESTAMP: u64 = (1 << 54) - 1;

/// Largest shard id (2^32 - 1).
pub const MAX_SHARD_ID: u32 = u32::MAX;

/// Largest value of the 36-bit random tail.
pub const MAX_RANDOM: u64 = (1 << 36) - 1;

/// Version nibble stamped into every identifier (UUIDv8).
pub const VERSION: u8 = 8;

/// Variant bits stamped into every identifier (binary `10`).
pub const VARIANT: u8 = 0b10;

/// A 128-bit, time-ordered, shard-aware identifier.
///
/// The value is held as two big-endian 64-bit words. Every field lives
/// entirely inside one word, so no read or write ever shifts across the word
/// boundary:
///
/// ```text
///  high word
///  Bit Index:  63              16 15   12 11        6 5          0
///              +-----------------+-------+-----------+------------+
///  Field:      | time_high (48)  | ver(4)| time_low 6| shard_hi 6 |
///              +-----------------+-------+-----------+------------+
///
///  low word
///  Bit Index:  63  62 61             36 35                       0
///              +-----+-----------------+--------------------------+
///  Field:      |var 2| shard_low (26)  |       random (36)        |
///              +-----+-----------------+--------------------------+
/// ```
///
/// The timestamp occupies the most significant bits, so comparing `high` then
/// `low` as unsigned integers (the derived order) is chronological, and
/// matches the lexicographic order of the canonical string.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct MicroShardId {
    high: u64,
    low: u64,
}

impl MicroShardId {
    pub const TIMESTAMP_BITS: u32 = 54;
    pub const SHARD_BITS: u32 = 32;
    pub const RANDOM_BITS: u32 = 36;

    // high word
    const TIME_LOW_BITS: u32 = 6;
    const TIME_HIGH_MASK: u64 = (1 << 48) - 1;
    const TIME_LOW_MASK: u64 = (1 << Self::TIME_LOW_BITS) - 1;
    const TIME_HIGH_SHIFT: u32 = 16;
    const VERSION_SHIFT: u32 = 12;
    const TIME_LOW_SHIFT: u32 = 6;
    const SHARD_HIGH_MASK: u64 = (1 << 6) - 1;

    // low word
    const SHARD_LOW_BITS: u32 = 26;
    const SHARD_LOW_MASK: u64 = (1 << Self::SHARD_LOW_BITS) - 1;
    const VARIANT_SHIFT: u32 = 62;
    const SHARD_LOW_SHIFT: u32 = 36;

    const VERSION_MASK: u64 = 0xF << Self::VERSION_SHIFT;
    const VARIANT_MASK: u64 = 0b11 << Self::VARIANT_SHIFT;

    /// Packs the fields into a new identifier.
    ///
    /// Only the low 36 bits of `random` are used. The version and variant
    /// markers are always set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimeOverflow`] if `timestamp` exceeds
    /// [`MAX_TIMESTAMP`]. The timestamp is never truncated.
    ///
    /// # Example
    /// ```
    /// use microshard::MicroShardId;
    ///
    /// let id = MicroShardId::encode(1_672_531_200_000_000, 1, 0).unwrap();
    /// assert_eq!(id.to_string(), "17c4a210-3500-8000-8000-001000000000");
    /// assert_eq!(id.decode(), (1_672_531_200_000_000, 1));
    /// ```
    pub const fn encode(timestamp: u64, shard_id: u32, random: u64) -> Result<Self> {
        if timestamp > MAX_TIMESTAMP {
            return Err(Error::TimeOverflow { micros: timestamp });
        }
        Ok(Self::from_parts(timestamp, shard_id, random))
    }

    /// Infallible packing for timestamps already known to be in range.
    const fn from_parts(timestamp: u64, shard_id: u32, random: u64) -> Self {
        let shard = shard_id as u64;

        let time_high = (timestamp >> Self::TIME_LOW_BITS) & Self::TIME_HIGH_MASK;
        let time_low = timestamp & Self::TIME_LOW_MASK;
        let shard_high = (shard >> Self::SHARD_LOW_BITS) & Self::SHARD_HIGH_MASK;
        let high = (time_high << Self::TIME_HIGH_SHIFT)
            | ((VERSION as u64) << Self::VERSION_SHIFT)
            | (time_low << Self::TIME_LOW_SHIFT)
            | shard_high;

        let shard_low = shard & Self::SHARD_LOW_MASK;
        let low = ((VARIANT as u64) << Self::VARIANT_SHIFT)
            | (shard_low << Self::SHARD_LOW_SHIFT)
            | (random & MAX_RANDOM);

        Self { high, low }
    }

    /// Packs the fields using an already validated [`ShardId`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimeOverflow`] if `timestamp` exceeds
    /// [`MAX_TIMESTAMP`].
    pub const fn from_components(timestamp: u64, shard_id: ShardId, random: u64) -> Result<Self> {
        Self::encode(timestamp, shard_id.get(), random)
    }

    /// Splits the identifier into `(timestamp, shard_id)`.
    ///
    /// Total: the markers are not checked, so an identifier with a bad version
    /// or variant still yields the fields at their fixed positions.
    #[must_use]
    pub const fn decode(&self) -> (u64, u32) {
        (self.timestamp(), self.shard_id())
    }

    /// Microseconds since the Unix epoch.
    #[must_use]
    pub const fn timestamp(&self) -> u64 {
        let time_high = (self.high >> Self::TIME_HIGH_SHIFT) & Self::TIME_HIGH_MASK;
        let time_low = (self.high >> Self::TIME_LOW_SHIFT) & Self::TIME_LOW_MASK;
        (time_high << Self::TIME_LOW_BITS) | time_low
    }

    /// The embedded 32-bit shard id.
    #[must_use]
    pub const fn shard_id(&self) -> u32 {
        let shard_high = self.high & Self::SHARD_HIGH_MASK;
        let shard_low = (self.low >> Self::SHARD_LOW_SHIFT) & Self::SHARD_LOW_MASK;
        ((shard_high << Self::SHARD_LOW_BITS) | shard_low) as u32
    }

    /// The 36-bit random tail.
    #[must_use]
    pub const fn random(&self) -> u64 {
        self.low & MAX_RANDOM
    }

    /// The version nibble (8 for every valid identifier).
    #[must_use]
    pub const fn version(&self) -> u8 {
        ((self.high & Self::VERSION_MASK) >> Self::VERSION_SHIFT) as u8
    }

    /// The two variant bits (`0b10` for every valid identifier).
    #[must_use]
    pub const fn variant(&self) -> u8 {
        (self.low >> Self::VARIANT_SHIFT) as u8
    }

    /// Returns `true` if both protocol markers hold their required values.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.version() == VERSION && self.variant() == VARIANT
    }

    /// Checks the protocol markers, reporting the version first.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidVersion`] or [`Error::InvalidVariant`].
    pub const fn validate(self) -> Result<Self> {
        if self.version() != VERSION {
            return Err(Error::InvalidVersion {
                version: self.version(),
            });
        }
        if self.variant() != VARIANT {
            return Err(Error::InvalidVariant {
                variant: self.variant(),
            });
        }
        Ok(self)
    }

    /// Returns a copy with the version and variant markers forced to their
    /// required values. All other bits are left untouched.
    #[must_use]
    pub const fn into_valid(self) -> Self {
        Self {
            high: (self.high & !Self::VERSION_MASK) | ((VERSION as u64) << Self::VERSION_SHIFT),
            low: (self.low & !Self::VARIANT_MASK) | ((VARIANT as u64) << Self::VARIANT_SHIFT),
        }
    }

    /// The most significant 64 bits.
    #[must_use]
    pub const fn high(&self) -> u64 {
        self.high
    }

    /// The least significant 64 bits.
    #[must_use]
    pub const fn low(&self) -> u64 {
        self.low
    }

    /// Builds an identifier from raw words without any validation.
    #[must_use]
    pub const fn from_words(high: u64, low: u64) -> Self {
        Self { high, low }
    }

    /// The identifier as a native 128-bit integer.
    #[must_use]
    pub const fn to_u128(&self) -> u128 {
        ((self.high as u128) << 64) | self.low as u128
    }

    /// Builds an identifier from a native 128-bit integer without validation.
    #[must_use]
    pub const fn from_u128(raw: u128) -> Self {
        Self {
            high: (raw >> 64) as u64,
            low: raw as u64,
        }
    }

    /// Total order over identifiers: `high` first, then `low`, both unsigned.
    #[must_use]
    pub const fn compare(&self, other: &Self) -> Ordering {
        if self.high < other.high {
            Ordering::Less
        } else if self.high > other.high {
            Ordering::Greater
        } else if self.low < other.low {
            Ordering::Less
        } else if self.low > other.low {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    /// The creation time as a [`std::time::SystemTime`], with microsecond
    /// precision.
    #[cfg(feature = "std")]
    #[must_use]
    pub fn datetime(&self) -> std::time::SystemTime {
        std::time::SystemTime::UNIX_EPOCH + core::time::Duration::from_micros(self.timestamp())
    }
}

/// Compares two identifiers chronologically. Ties on time and shard fall back
/// to the random tail.
#[must_use]
pub const fn compare(a: &MicroShardId, b: &MicroShardId) -> Ordering {
    a.compare(b)
}

impl PartialOrd for MicroShardId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MicroShardId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl From<MicroShardId> for u128 {
    fn from(id: MicroShardId) -> Self {
        id.to_u128()
    }
}

impl fmt::Debug for MicroShardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MicroShardId")
            .field("id", &format_args!("{self}"))
            .field("timestamp", &format_args!("{} ({})", self.timestamp(), self.iso_time()))
            .field("shard_id", &self.shard_id())
            .field("random", &format_args!("{:#x}", self.random()))
            .field("version", &self.version())
            .field("variant", &format_args!("{:#04b}", self.variant()))
            .finish()
    }
}
