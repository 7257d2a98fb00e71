use super::civil::{
    MICROS_PER_DAY, MICROS_PER_HOUR, MICROS_PER_MINUTE, MICROS_PER_SECOND, civil_from_days,
};
use crate::{Error, MicroShardId, Result};
use core::fmt;

/// Room for a six-digit year, which is as far as `u64` microseconds reach.
const MAX_LEN: usize = 32;

/// Renders microseconds since the Unix epoch as
/// `YYYY-MM-DDTHH:MM:SS.ffffffZ`.
///
/// The fraction always has six digits. Years past 9999 are written with as
/// many digits as they need; earlier years are zero-padded to four.
///
/// # Example
/// ```
/// use microshard::format_iso;
///
/// assert_eq!(format_iso(0), "1970-01-01T00:00:00.000000Z");
/// assert_eq!(format_iso(1_709_200_800_000_001), "2024-02-29T10:00:00.000001Z");
/// ```
#[must_use]
pub fn format_iso(micros: u64) -> IsoFormatter {
    IsoFormatter::new(micros)
}

/// Writes the ISO-8601 rendering of `micros` into a caller-supplied buffer.
///
/// # Errors
///
/// Returns [`Error::BufferTooSmall`] if the rendering does not fit. Nothing
/// is written in that case.
pub fn format_iso_into(micros: u64, buf: &mut [u8]) -> Result<&str> {
    let formatted = IsoFormatter::new(micros);
    let bytes = formatted.as_str().as_bytes();
    let len = buf.len();
    let Some(dest) = buf.get_mut(..bytes.len()) else {
        return Err(Error::BufferTooSmall {
            needed: bytes.len(),
            len,
        });
    };
    dest.copy_from_slice(bytes);
    // SAFETY: `dest` was copied from a `&str`
    Ok(unsafe { core::str::from_utf8_unchecked(dest) })
}

impl MicroShardId {
    /// The embedded timestamp rendered as an ISO-8601 UTC string.
    ///
    /// # Example
    /// ```
    /// use microshard::MicroShardId;
    ///
    /// let id = MicroShardId::encode(1_672_574_400_123_456, 7, 0).unwrap();
    /// assert_eq!(id.iso_time(), "2023-01-01T12:00:00.123456Z");
    /// ```
    #[must_use]
    pub fn iso_time(&self) -> IsoFormatter {
        IsoFormatter::new(self.timestamp())
    }
}

/// A stack-allocated ISO-8601 rendering. Implements [`fmt::Display`] and
/// [`AsRef<str>`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct IsoFormatter {
    buf: [u8; MAX_LEN],
    len: usize,
}

impl IsoFormatter {
    fn new(micros: u64) -> Self {
        let days = (micros / MICROS_PER_DAY) as i64;
        let of_day = micros % MICROS_PER_DAY;
        let (year, month, day) = civil_from_days(days);

        let mut out = Self {
            buf: [0; MAX_LEN],
            len: 0,
        };
        out.push_number(year.unsigned_abs(), 4);
        out.push(b'-');
        out.push_number(u64::from(month), 2);
        out.push(b'-');
        out.push_number(u64::from(day), 2);
        out.push(b'T');
        out.push_number(of_day / MICROS_PER_HOUR, 2);
        out.push(b':');
        out.push_number(of_day % MICROS_PER_HOUR / MICROS_PER_MINUTE, 2);
        out.push(b':');
        out.push_number(of_day % MICROS_PER_MINUTE / MICROS_PER_SECOND, 2);
        out.push(b'.');
        out.push_number(of_day % MICROS_PER_SECOND, 6);
        out.push(b'Z');
        out
    }

    fn push(&mut self, byte: u8) {
        self.buf[self.len] = byte;
        self.len += 1;
    }

    /// Writes `value` in decimal, left-padded with zeros to `width`.
    fn push_number(&mut self, mut value: u64, width: usize) {
        let mut digits = 1;
        let mut rest = value / 10;
        while rest > 0 {
            digits += 1;
            rest /= 10;
        }
        let digits = digits.max(width);
        for slot in self.buf[self.len..self.len + digits].iter_mut().rev() {
            *slot = b'0' + (value % 10) as u8;
            value /= 10;
        }
        self.len += digits;
    }

    /// Returns a `&str` view of the rendering.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // SAFETY: only ASCII digits and separators are ever pushed
        unsafe { core::str::from_utf8_unchecked(&self.buf[..self.len]) }
    }

    /// Returns an allocated `String` of the rendering.
    #[cfg(feature = "alloc")]
    #[allow(clippy::inherent_to_string_shadow_display)]
    #[must_use]
    pub fn to_string(&self) -> alloc::string::String {
        alloc::string::String::from(self.as_str())
    }
}

impl fmt::Display for IsoFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for IsoFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IsoFormatter").field(&self.as_str()).finish()
    }
}

impl AsRef<str> for IsoFormatter {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<&str> for IsoFormatter {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<str> for IsoFormatter {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}
