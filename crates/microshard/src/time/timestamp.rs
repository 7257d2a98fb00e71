use crate::{Result, parse_iso};
use core::time::Duration;

#[cfg(feature = "std")]
use crate::{Error, IsoField};

/// Anything that names an instant, as microseconds since the Unix epoch.
///
/// Implemented for raw `u64` microseconds, ISO-8601 strings (via
/// [`parse_iso`]), [`Duration`] since the epoch, and, with `std`,
/// [`std::time::SystemTime`].
///
/// Range checking against the 54-bit timestamp field happens at encode time,
/// not here.
pub trait IntoTimestamp {
    /// Converts into microseconds since the Unix epoch.
    ///
    /// # Errors
    ///
    /// Strings report parse errors; instants that cannot be expressed as
    /// `u64` microseconds since the epoch are rejected.
    fn into_micros(self) -> Result<u64>;
}

impl IntoTimestamp for u64 {
    fn into_micros(self) -> Result<u64> {
        Ok(self)
    }
}

impl IntoTimestamp for &str {
    fn into_micros(self) -> Result<u64> {
        parse_iso(self)
    }
}

#[cfg(feature = "alloc")]
impl IntoTimestamp for alloc::string::String {
    fn into_micros(self) -> Result<u64> {
        parse_iso(&self)
    }
}

#[cfg(feature = "alloc")]
impl IntoTimestamp for &alloc::string::String {
    fn into_micros(self) -> Result<u64> {
        parse_iso(self)
    }
}

impl IntoTimestamp for Duration {
    fn into_micros(self) -> Result<u64> {
        Ok(u64::try_from(self.as_micros()).unwrap_or(u64::MAX))
    }
}

#[cfg(feature = "std")]
impl IntoTimestamp for std::time::SystemTime {
    fn into_micros(self) -> Result<u64> {
        self.duration_since(std::time::UNIX_EPOCH)
            .map_err(|_| Error::OutOfRange {
                field: IsoField::Year,
            })?
            .into_micros()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn raw_and_iso_agree() {
        assert_eq!(1_672_531_200_000_000_u64.into_micros(), Ok(1_672_531_200_000_000));
        assert_eq!(
            "2023-01-01T00:00:00Z".into_micros(),
            Ok(1_672_531_200_000_000)
        );
        assert_eq!(
            Duration::from_secs(1_672_531_200).into_micros(),
            Ok(1_672_531_200_000_000)
        );
    }

    #[test]
    fn iso_errors_pass_through() {
        assert_eq!(
            "2023/01/01T00:00:00Z".into_micros(),
            Err(Error::BadFormat { index: 4 })
        );
    }

    #[test]
    fn huge_durations_saturate() {
        assert_eq!(Duration::MAX.into_micros(), Ok(u64::MAX));
    }

    #[cfg(feature = "std")]
    #[test]
    fn system_time_before_epoch_is_rejected() {
        let before = std::time::UNIX_EPOCH - Duration::from_secs(1);
        assert_eq!(
            before.into_micros(),
            Err(Error::OutOfRange {
                field: crate::IsoField::Year
            })
        );
        let after = std::time::UNIX_EPOCH + Duration::from_micros(42);
        assert_eq!(after.into_micros(), Ok(42));
    }
}
