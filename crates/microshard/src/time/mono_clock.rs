use crate::{SystemClock, TimeSource};

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
use web_time::Instant;
#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
use std::time::Instant;

/// A monotonic time source aligned to the Unix epoch.
///
/// The wall clock is sampled once at construction; afterwards time advances
/// by a monotonic timer (`Instant`) only. This avoids wall-clock adjustments
/// (e.g., NTP steps) while still producing real-world timestamps, so a
/// process never sees time go backward.
///
/// Two clocks built at different moments can disagree by however far the
/// wall clock moved between them. Share one instance (it is `Copy`) when
/// several generators should agree.
///
/// # Example
/// ```
/// use microshard::{MonotonicClock, TimeSource};
///
/// let clock = MonotonicClock::new();
/// let a = clock.current_micros();
/// let b = clock.current_micros();
/// assert!(b >= a);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    start: Instant,
    origin: u64, // microseconds since the Unix epoch at `start`
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    /// Anchors a new clock to the current wall-clock time.
    #[must_use]
    pub fn new() -> Self {
        Self::with_origin(SystemClock.current_micros())
    }

    /// Anchors a new clock so that it reads `origin` right now.
    #[must_use]
    pub fn with_origin(origin: u64) -> Self {
        Self {
            start: Instant::now(),
            origin,
        }
    }
}

impl TimeSource for MonotonicClock {
    fn current_micros(&self) -> u64 {
        let elapsed = u64::try_from(self.start.elapsed().as_micros()).unwrap_or(u64::MAX);
        self.origin.saturating_add(elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn never_goes_backward() {
        let clock = MonotonicClock::new();
        let mut last = clock.current_micros();
        for _ in 0..10_000 {
            let now = clock.current_micros();
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn advances_from_origin() {
        let clock = MonotonicClock::with_origin(1_000);
        std::thread::sleep(Duration::from_millis(2));
        assert!(clock.current_micros() >= 3_000);
    }

    #[test]
    fn tracks_the_wall_clock() {
        let clock = MonotonicClock::new();
        let wall = SystemClock.current_micros();
        assert!(clock.current_micros().abs_diff(wall) < 5_000_000);
    }
}
