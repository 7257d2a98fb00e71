use core::fmt;

/// A result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Calendar field that failed range validation while parsing an ISO-8601
/// timestamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IsoField {
    /// The date falls before 1970-01-01, which has no representation.
    Year,
    /// Month outside `1..=12`.
    Month,
    /// Day outside the length of the given month in the given year.
    Day,
    /// Hour outside `0..=23`.
    Hour,
    /// Minute outside `0..=59`.
    Minute,
    /// Second outside `0..=60`.
    Second,
}

impl fmt::Display for IsoField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
        };
        f.write_str(name)
    }
}

/// All errors that `microshard` can produce.
///
/// Every variant is local and synchronous. Nothing in this crate retries on
/// the caller's behalf: malformed input is rejected, never coerced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The shard id does not fit in 32 unsigned bits. Negative input is
    /// rejected rather than wrapped.
    #[error("shard id {value} is outside 0..=4294967295")]
    ShardOutOfRange {
        /// The rejected input, widened losslessly.
        value: i128,
    },

    /// The timestamp does not fit in the 54-bit time field (past late 2540).
    #[error("time overflow: {micros}us exceeds the 54-bit timestamp field")]
    TimeOverflow {
        /// The rejected timestamp in microseconds since the Unix epoch.
        micros: u64,
    },

    /// A string or byte input had the wrong size.
    #[error("invalid length: {len}")]
    BadLength {
        /// Length of the rejected input.
        len: usize,
    },

    /// A character that is not a hex digit (or a misplaced group separator)
    /// was found in an identifier string.
    #[error("invalid hex character {byte:#04x} at index {index}")]
    InvalidHex {
        /// The offending byte.
        byte: u8,
        /// Byte offset into the input.
        index: usize,
    },

    /// The version nibble is not 8.
    #[error("invalid version: expected 8, found {version}")]
    InvalidVersion {
        /// The version nibble that was found.
        version: u8,
    },

    /// The variant bits are not binary `10`.
    #[error("invalid variant: expected 0b10, found {variant:#04b}")]
    InvalidVariant {
        /// The two variant bits that were found.
        variant: u8,
    },

    /// An ISO-8601 timestamp did not match `YYYY-MM-DDTHH:MM:SS[.ffffff][Z]`.
    #[error("invalid ISO-8601 syntax at index {index}")]
    BadFormat {
        /// Byte offset of the first unexpected character.
        index: usize,
    },

    /// An ISO-8601 timestamp was well formed but names a date or time that
    /// does not exist or cannot be represented.
    #[error("ISO-8601 {field} out of range")]
    OutOfRange {
        /// The field that failed validation.
        field: IsoField,
    },

    /// A caller-supplied output buffer cannot hold the full encoding.
    #[error("buffer too small: need {needed} bytes, got {len}")]
    BufferTooSmall {
        /// Bytes required for the encoding.
        needed: usize,
        /// Bytes available in the buffer.
        len: usize,
    },

    /// No entropy was available to seed the random source.
    #[error("entropy unavailable: random source could not be seeded")]
    EntropyUnavailable,
}

impl From<core::convert::Infallible> for Error {
    fn from(never: core::convert::Infallible) -> Self {
        match never {}
    }
}
