use crate::Error;
use core::fmt;

/// A caller-assigned 32-bit partition (tenant, region, ...) identifier.
///
/// Any integer converts into a `ShardId` through [`TryFrom`]; input outside
/// `0..=4294967295` is rejected with [`Error::ShardOutOfRange`], including
/// negative values, which are never wrapped into the unsigned range.
///
/// # Example
/// ```
/// use microshard::{Error, ShardId};
///
/// assert_eq!(ShardId::try_from(4_294_967_295_u64).unwrap().get(), u32::MAX);
/// assert_eq!(
///     ShardId::try_from(4_294_967_296_u64),
///     Err(Error::ShardOutOfRange { value: 4_294_967_296 })
/// );
/// assert!(ShardId::try_from(-1_i64).is_err());
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ShardId(u32);

impl ShardId {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(u32::MAX);

    #[must_use]
    pub const fn new(shard_id: u32) -> Self {
        Self(shard_id)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ShardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<ShardId> for u32 {
    fn from(shard_id: ShardId) -> Self {
        shard_id.0
    }
}

macro_rules! shard_from_lossless {
    ($($int:ty),*) => {
        $(
            impl From<$int> for ShardId {
                fn from(value: $int) -> Self {
                    Self(u32::from(value))
                }
            }
        )*
    };
}

macro_rules! shard_try_from {
    ($($int:ty),*) => {
        $(
            impl TryFrom<$int> for ShardId {
                type Error = Error;

                fn try_from(value: $int) -> Result<Self, Self::Error> {
                    u32::try_from(value).map(Self).map_err(|_| Error::ShardOutOfRange {
                        value: value as i128,
                    })
                }
            }
        )*
    };
}

shard_from_lossless!(u8, u16, u32);
shard_try_from!(i8, i16, i32, i64, i128, isize, u64, usize);

impl TryFrom<u128> for ShardId {
    type Error = Error;

    fn try_from(value: u128) -> Result<Self, Self::Error> {
        u32::try_from(value).map(Self).map_err(|_| Error::ShardOutOfRange {
            // saturate: anything this large is out of range regardless
            value: i128::try_from(value).unwrap_or(i128::MAX),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_full_unsigned_range() {
        assert_eq!(ShardId::try_from(0_i32).unwrap(), ShardId::MIN);
        assert_eq!(ShardId::try_from(4_294_967_295_i64).unwrap(), ShardId::MAX);
        assert_eq!(ShardId::try_from(4_294_967_295_u64).unwrap().get(), u32::MAX);
        assert_eq!(ShardId::from(7_u8).get(), 7);
        assert_eq!(ShardId::from(65_535_u16).get(), 65_535);
    }

    #[test]
    fn rejects_negative_instead_of_wrapping() {
        assert_eq!(
            ShardId::try_from(-1_i32),
            Err(Error::ShardOutOfRange { value: -1 })
        );
        assert_eq!(
            ShardId::try_from(i64::MIN),
            Err(Error::ShardOutOfRange {
                value: i128::from(i64::MIN)
            })
        );
    }

    #[test]
    fn rejects_above_32_bits() {
        assert_eq!(
            ShardId::try_from(4_294_967_296_u64),
            Err(Error::ShardOutOfRange {
                value: 4_294_967_296
            })
        );
        assert_eq!(
            ShardId::try_from(u128::MAX),
            Err(Error::ShardOutOfRange { value: i128::MAX })
        );
    }
}
