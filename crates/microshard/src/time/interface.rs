/// A trait for time sources that return a wall-clock timestamp.
///
/// This abstraction allows you to plug in a real system clock, a monotonic
/// timer, or a mocked time source in tests.
///
/// The unit is **microseconds since the Unix epoch** (1970-01-01T00:00:00Z).
///
/// # Example
///
/// ```
/// use microshard::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_micros(&self) -> u64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_micros(), 1234);
/// ```
pub trait TimeSource {
    /// Returns the current time in microseconds since the Unix epoch.
    fn current_micros(&self) -> u64;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn current_micros(&self) -> u64 {
        (**self).current_micros()
    }
}
