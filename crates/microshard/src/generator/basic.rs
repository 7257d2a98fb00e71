#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{Error, IntoTimestamp, MicroShardId, RandSource, Result, ShardId, TimeSource};

/// A stateless identifier generator composed from a [`TimeSource`] and a
/// [`RandSource`].
///
/// Each call reads the clock, draws 36 random bits and packs them with the
/// caller's shard id. There is no sequence counter and no retry: any failure
/// from the clock, the random source or the encoder is returned as is.
///
/// ## Features
/// - ✅ Thread-safe when both sources are
/// - ✅ Probabilistically unique (no coordination required)
/// - ✅ Time-ordered at microsecond resolution (random within a microsecond)
///
/// ## See Also
/// - [`ShardGenerator`]
///
/// [`ShardGenerator`]: crate::ShardGenerator
#[derive(Clone, Debug, Default)]
pub struct MicroShardGenerator<T, R>
where
    T: TimeSource,
    R: RandSource,
{
    time: T,
    rng: R,
}

impl<T, R> MicroShardGenerator<T, R>
where
    T: TimeSource,
    R: RandSource,
{
    /// Creates a new [`MicroShardGenerator`] with the provided time source
    /// and RNG.
    ///
    /// # Parameters
    /// - `time`: A [`TimeSource`] used to retrieve the current timestamp
    /// - `rng`: A [`RandSource`] used to generate random bits
    ///
    /// # Example
    /// ```
    /// use microshard::{MicroShardGenerator, MonotonicClock, ThreadRandom};
    ///
    /// let generator = MicroShardGenerator::new(MonotonicClock::new(), ThreadRandom);
    /// let id = generator.generate(42_u32).unwrap();
    /// assert_eq!(id.shard_id(), 42);
    /// ```
    pub const fn new(time: T, rng: R) -> Self {
        Self { time, rng }
    }

    /// Generates an identifier stamped with the current time.
    ///
    /// The shard id is range-checked before the clock or the random source is
    /// touched.
    ///
    /// # Errors
    ///
    /// - [`Error::ShardOutOfRange`] if `shard_id` is outside `0..=2^32-1`
    /// - [`Error::TimeOverflow`] if the clock reads past [`MAX_TIMESTAMP`]
    /// - [`Error::EntropyUnavailable`] if the random source cannot be used
    ///
    /// # Example
    /// ```
    /// use microshard::{Error, FixedClock, MicroShardGenerator, ThreadRandom};
    ///
    /// let generator = MicroShardGenerator::new(FixedClock::new(1_000), ThreadRandom);
    /// assert_eq!(generator.generate(7_u8).unwrap().timestamp(), 1_000);
    /// assert_eq!(
    ///     generator.generate(-1_i64),
    ///     Err(Error::ShardOutOfRange { value: -1 })
    /// );
    /// ```
    ///
    /// [`MAX_TIMESTAMP`]: crate::MAX_TIMESTAMP
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip_all))]
    pub fn generate<S>(&self, shard_id: S) -> Result<MicroShardId>
    where
        S: TryInto<ShardId>,
        Error: From<S::Error>,
    {
        let shard_id = shard_id.try_into()?;
        self.encode(self.time.current_micros(), shard_id)
    }

    /// Generates an identifier for an explicit instant instead of the
    /// current time, for backfilling historical records.
    ///
    /// `instant` is anything implementing [`IntoTimestamp`]: raw
    /// microseconds, an ISO-8601 string, a `Duration` since the epoch, or a
    /// `SystemTime`.
    ///
    /// # Errors
    ///
    /// As [`Self::generate`], plus any error from converting `instant`
    /// (e.g. [`Error::BadFormat`] for malformed ISO-8601 text).
    ///
    /// # Example
    /// ```
    /// use microshard::{MicroShardGenerator, SystemClock, ThreadRandom};
    ///
    /// let generator = MicroShardGenerator::new(SystemClock, ThreadRandom);
    /// let id = generator
    ///     .generate_at("2023-01-01T00:00:00.000000Z", 1_u32)
    ///     .unwrap();
    /// assert_eq!(id.timestamp(), 1_672_531_200_000_000);
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip_all))]
    pub fn generate_at<I, S>(&self, instant: I, shard_id: S) -> Result<MicroShardId>
    where
        I: IntoTimestamp,
        S: TryInto<ShardId>,
        Error: From<S::Error>,
    {
        let shard_id = shard_id.try_into()?;
        self.encode(instant.into_micros()?, shard_id)
    }

    fn encode(&self, timestamp: u64, shard_id: ShardId) -> Result<MicroShardId> {
        let random = self.rng.try_rand()?;
        MicroShardId::from_components(timestamp, shard_id, random)
    }

    /// The time source this generator reads.
    pub const fn time(&self) -> &T {
        &self.time
    }

    /// The random source this generator draws from.
    pub const fn rng(&self) -> &R {
        &self.rng
    }
}
