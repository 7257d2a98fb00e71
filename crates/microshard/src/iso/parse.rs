use super::civil::{
    MICROS_PER_DAY, MICROS_PER_HOUR, MICROS_PER_MINUTE, MICROS_PER_SECOND, days_from_civil,
    days_in_month,
};
use crate::{Error, IsoField, Result};

/// Length of the canonical `YYYY-MM-DDTHH:MM:SS.ffffffZ` form.
pub const ISO_LEN: usize = 27;

/// Shortest accepted input: `YYYY-MM-DDTHH:MM:SS`.
const MIN_LEN: usize = 19;

const SEPARATORS: [(usize, u8); 5] = [(4, b'-'), (7, b'-'), (10, b'T'), (13, b':'), (16, b':')];

const MAX_FRACTION_DIGITS: usize = 6;

/// Parses a UTC timestamp of the form `YYYY-MM-DDTHH:MM:SS[.ffffff][Z]` into
/// microseconds since the Unix epoch.
///
/// The grammar is strict: four-digit year, two-digit fields, a fraction of one
/// to six digits, and at most a trailing uppercase `Z`. Offsets other than UTC
/// are not accepted. A second value of 60 is tolerated and carries into the
/// next minute.
///
/// # Errors
///
/// - [`Error::BadLength`] when the input cannot possibly match the grammar
/// - [`Error::BadFormat`] for a wrong separator, a non-digit, or trailing
///   characters, with the offending byte offset
/// - [`Error::OutOfRange`] for an impossible calendar field, or a date before
///   1970-01-01
///
/// # Example
/// ```
/// use microshard::{parse_iso, Error, IsoField};
///
/// assert_eq!(parse_iso("1970-01-01T00:00:01.5Z"), Ok(1_500_000));
/// assert_eq!(
///     parse_iso("2023-02-30T00:00:00Z"),
///     Err(Error::OutOfRange { field: IsoField::Day })
/// );
/// ```
pub fn parse_iso(s: &str) -> Result<u64> {
    let input = s.as_bytes();
    let len = input.len();
    if !(MIN_LEN..=ISO_LEN).contains(&len) {
        return Err(Error::BadLength { len });
    }

    for (index, expected) in SEPARATORS {
        if input[index] != expected {
            return Err(Error::BadFormat { index });
        }
    }

    let year = digits(input, 0, 4)?;
    let month = digits(input, 5, 2)?;
    let day = digits(input, 8, 2)?;
    let hour = digits(input, 11, 2)?;
    let minute = digits(input, 14, 2)?;
    let second = digits(input, 17, 2)?;

    let mut pos = MIN_LEN;
    let mut fraction = 0;
    if input.get(pos) == Some(&b'.') {
        pos += 1;
        let start = pos;
        let mut scale = MICROS_PER_SECOND / 10;
        while let Some(&byte) = input.get(pos).filter(|b| b.is_ascii_digit()) {
            if pos - start == MAX_FRACTION_DIGITS {
                return Err(Error::BadFormat { index: pos });
            }
            fraction += u64::from(byte - b'0') * scale;
            scale /= 10;
            pos += 1;
        }
        if pos == start {
            return Err(Error::BadFormat { index: pos });
        }
    }
    if input.get(pos) == Some(&b'Z') {
        pos += 1;
    }
    if pos != len {
        return Err(Error::BadFormat { index: pos });
    }

    let year = i64::from(year);
    if !(1..=12).contains(&month) {
        return Err(out_of_range(IsoField::Month));
    }
    if day == 0 || day > days_in_month(year, month) {
        return Err(out_of_range(IsoField::Day));
    }
    if hour > 23 {
        return Err(out_of_range(IsoField::Hour));
    }
    if minute > 59 {
        return Err(out_of_range(IsoField::Minute));
    }
    if second > 60 {
        return Err(out_of_range(IsoField::Second));
    }

    let days = u64::try_from(days_from_civil(year, month, day))
        .map_err(|_| out_of_range(IsoField::Year))?;

    Ok(days * MICROS_PER_DAY
        + u64::from(hour) * MICROS_PER_HOUR
        + u64::from(minute) * MICROS_PER_MINUTE
        + u64::from(second) * MICROS_PER_SECOND
        + fraction)
}

/// Reads `count` ASCII digits starting at `start`.
fn digits(input: &[u8], start: usize, count: usize) -> Result<u32> {
    let mut value = 0;
    for (index, &byte) in input.iter().enumerate().skip(start).take(count) {
        if !byte.is_ascii_digit() {
            return Err(Error::BadFormat { index });
        }
        value = value * 10 + u32::from(byte - b'0');
    }
    Ok(value)
}

const fn out_of_range(field: IsoField) -> Error {
    Error::OutOfRange { field }
}
