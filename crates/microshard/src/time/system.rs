use crate::TimeSource;

/// The host's wall clock, read on every call.
///
/// Times before the Unix epoch read as 0. The clock is not monotonic: if the
/// host clock steps backward, so do the timestamps. See [`MonotonicClock`]
/// for a source that never does.
///
/// [`MonotonicClock`]: crate::MonotonicClock
#[derive(Default, Clone, Copy, Debug)]
pub struct SystemClock;

impl SystemClock {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl TimeSource for SystemClock {
    fn current_micros(&self) -> u64 {
        #[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
        let now = {
            use web_time::web::SystemTimeExt;
            web_time::SystemTime::now().to_std()
        };
        #[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
        let now = std::time::SystemTime::now();

        now.duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |elapsed| {
                u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX)
            })
    }
}
