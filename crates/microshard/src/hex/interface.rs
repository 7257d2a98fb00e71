use super::codec::{self, BYTES_LEN, CANONICAL_LEN, SIMPLE_LEN};
use crate::{Error, MicroShardId, Result};
use core::fmt;
use core::str::FromStr;

impl MicroShardId {
    /// Returns a stack-allocated formatter holding the canonical
    /// `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx` form.
    ///
    /// # Example
    /// ```
    /// use microshard::MicroShardId;
    ///
    /// let id = MicroShardId::encode(0, 0, 0).unwrap();
    /// assert_eq!(id.encode_hex(), "00000000-0000-8000-8000-000000000000");
    /// ```
    #[must_use]
    pub fn encode_hex(&self) -> HexFormatter {
        HexFormatter::canonical(self)
    }

    /// Returns a formatter holding the 32-character form without separators.
    #[must_use]
    pub fn simple(&self) -> HexFormatter {
        HexFormatter::simple(self)
    }

    /// Writes the canonical form into a caller-supplied buffer and returns a
    /// view of the written characters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferTooSmall`] if `buf` holds fewer than
    /// [`CANONICAL_LEN`] bytes. Nothing is written in that case.
    pub fn encode_to_buf<'buf>(&self, buf: &'buf mut [u8]) -> Result<&'buf str> {
        let len = buf.len();
        let Some(dest) = buf
            .get_mut(..CANONICAL_LEN)
            .and_then(|dest| <&mut [u8; CANONICAL_LEN]>::try_from(dest).ok())
        else {
            return Err(Error::BufferTooSmall {
                needed: CANONICAL_LEN,
                len,
            });
        };
        codec::encode_canonical(&self.to_bytes(), dest);
        // SAFETY: the canonical encoding is ASCII only
        Ok(unsafe { core::str::from_utf8_unchecked(dest) })
    }

    /// Parses the 36-character hyphenated or 32-character plain form.
    ///
    /// Hex digits are case-insensitive. After decoding, the version nibble and
    /// variant bits are re-checked.
    ///
    /// # Errors
    ///
    /// - [`Error::BadLength`] if the input is neither 36 nor 32 bytes long
    /// - [`Error::InvalidHex`] for a non-hex character or a misplaced separator
    /// - [`Error::InvalidVersion`] if the version nibble is not 8
    /// - [`Error::InvalidVariant`] if the variant bits are not `10`
    ///
    /// # Example
    /// ```
    /// use microshard::{Error, MicroShardId};
    ///
    /// let id = MicroShardId::parse("17C4A210-3500-8000-8000-001000000000").unwrap();
    /// assert_eq!(id.shard_id(), 1);
    ///
    /// assert_eq!(
    ///     MicroShardId::parse("17c4a210-3500-7000-8000-001000000000"),
    ///     Err(Error::InvalidVersion { version: 7 })
    /// );
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let bytes = codec::decode(s)?;
        Self::from_bytes(bytes).validate()
    }

    /// The 16-byte big-endian form: `high` first, most significant byte
    /// first.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; BYTES_LEN] {
        self.to_u128().to_be_bytes()
    }

    /// Inverse of [`Self::to_bytes`].
    ///
    /// Binary input is assumed to come from trusted storage: the markers are
    /// not validated. Use [`Self::validate`] when they must be.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; BYTES_LEN]) -> Self {
        Self::from_u128(u128::from_be_bytes(bytes))
    }

    /// Like [`Self::from_bytes`] for a slice of unknown length.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BadLength`] unless the slice is exactly 16 bytes.
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self> {
        <[u8; BYTES_LEN]>::try_from(bytes)
            .map(Self::from_bytes)
            .map_err(|_| Error::BadLength { len: bytes.len() })
    }
}

/// A zero-allocation view over an encoded identifier. Implements
/// [`fmt::Display`] and [`AsRef<str>`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexFormatter {
    buf: [u8; CANONICAL_LEN],
    len: usize,
}

impl HexFormatter {
    fn canonical(id: &MicroShardId) -> Self {
        let mut buf = [0_u8; CANONICAL_LEN];
        codec::encode_canonical(&id.to_bytes(), &mut buf);
        Self {
            buf,
            len: CANONICAL_LEN,
        }
    }

    fn simple(id: &MicroShardId) -> Self {
        let mut buf = [0_u8; CANONICAL_LEN];
        codec::encode_simple(&id.to_bytes(), &mut buf[..SIMPLE_LEN]);
        Self {
            buf,
            len: SIMPLE_LEN,
        }
    }

    /// Returns a `&str` view of the encoding.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // SAFETY: `self.buf[..self.len]` only ever holds lowercase hex digits
        // and hyphens
        unsafe { core::str::from_utf8_unchecked(&self.buf[..self.len]) }
    }

    /// Returns an allocated `String` of the encoding.
    #[cfg(feature = "alloc")]
    #[allow(clippy::inherent_to_string_shadow_display)]
    #[must_use]
    pub fn to_string(&self) -> alloc::string::String {
        alloc::string::String::from(self.as_str())
    }
}

impl fmt::Display for HexFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for HexFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HexFormatter").field(&self.as_str()).finish()
    }
}

impl AsRef<str> for HexFormatter {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<&str> for HexFormatter {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<str> for HexFormatter {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl fmt::Display for MicroShardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.encode_hex().as_str())
    }
}

impl FromStr for MicroShardId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for MicroShardId {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&[u8]> for MicroShardId {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::try_from_slice(bytes)
    }
}

impl From<[u8; BYTES_LEN]> for MicroShardId {
    fn from(bytes: [u8; BYTES_LEN]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<MicroShardId> for [u8; BYTES_LEN] {
    fn from(id: MicroShardId) -> Self {
        id.to_bytes()
    }
}

impl PartialEq<str> for MicroShardId {
    fn eq(&self, other: &str) -> bool {
        Self::parse(other).is_ok_and(|id| id == *self)
    }
}

impl PartialEq<&str> for MicroShardId {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(feature = "alloc")]
impl From<MicroShardId> for alloc::string::String {
    fn from(id: MicroShardId) -> Self {
        id.encode_hex().to_string()
    }
}

#[cfg(feature = "alloc")]
impl TryFrom<alloc::string::String> for MicroShardId {
    type Error = Error;

    fn try_from(s: alloc::string::String) -> Result<Self> {
        Self::parse(&s)
    }
}
