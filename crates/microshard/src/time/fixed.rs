use crate::{Result, TimeSource, parse_iso};

/// A clock frozen at one instant.
///
/// Useful for backfills, where every identifier should carry a historical
/// time, and for deterministic tests.
///
/// # Example
/// ```
/// use microshard::{FixedClock, TimeSource};
///
/// let clock = FixedClock::from_iso("2023-01-01T00:00:00Z").unwrap();
/// assert_eq!(clock.current_micros(), 1_672_531_200_000_000);
/// ```
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FixedClock(u64);

impl FixedClock {
    #[must_use]
    pub const fn new(micros: u64) -> Self {
        Self(micros)
    }

    /// Freezes the clock at an ISO-8601 UTC instant.
    ///
    /// # Errors
    ///
    /// Any error from [`parse_iso`].
    pub fn from_iso(s: &str) -> Result<Self> {
        parse_iso(s).map(Self)
    }

    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl TimeSource for FixedClock {
    fn current_micros(&self) -> u64 {
        self.0
    }
}
