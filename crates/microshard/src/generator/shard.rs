#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Error, IntoTimestamp, MicroShardGenerator, MicroShardId, RandSource, Result, ShardId,
    TimeSource,
};

/// A [`MicroShardGenerator`] bound to one shard.
///
/// Useful when a process (a worker, a tenant-scoped service) always mints
/// identifiers for the same partition. The shard is validated once, at
/// construction.
///
/// # Example
/// ```
/// use microshard::{ShardGenerator, SystemClock, ThreadRandom};
///
/// let generator = ShardGenerator::new(SystemClock, ThreadRandom, 500_u32).unwrap();
/// let id = generator.next_id().unwrap();
/// assert_eq!(id.shard_id(), 500);
///
/// let old = generator.at("2020-06-01T00:00:00Z").unwrap();
/// assert!(old < id);
/// ```
#[derive(Clone, Debug)]
pub struct ShardGenerator<T, R>
where
    T: TimeSource,
    R: RandSource,
{
    inner: MicroShardGenerator<T, R>,
    shard_id: ShardId,
}

impl<T, R> ShardGenerator<T, R>
where
    T: TimeSource,
    R: RandSource,
{
    /// Creates a generator that stamps every identifier with `shard_id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShardOutOfRange`] if `shard_id` does not fit in 32
    /// unsigned bits.
    pub fn new<S>(time: T, rng: R, shard_id: S) -> Result<Self>
    where
        S: TryInto<ShardId>,
        Error: From<S::Error>,
    {
        Ok(Self::with_generator(
            MicroShardGenerator::new(time, rng),
            shard_id.try_into()?,
        ))
    }

    /// Binds an existing generator to `shard_id`.
    pub const fn with_generator(inner: MicroShardGenerator<T, R>, shard_id: ShardId) -> Self {
        Self { inner, shard_id }
    }

    /// Generates an identifier for the bound shard at the current time.
    ///
    /// # Errors
    ///
    /// [`Error::TimeOverflow`] or [`Error::EntropyUnavailable`].
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self), fields(shard_id = self.shard_id.get())))]
    pub fn next_id(&self) -> Result<MicroShardId> {
        self.inner.generate(self.shard_id)
    }

    /// Generates an identifier for the bound shard at an explicit instant.
    ///
    /// # Errors
    ///
    /// As [`Self::next_id`], plus any error from converting `instant`.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip_all, fields(shard_id = self.shard_id.get())))]
    pub fn at<I>(&self, instant: I) -> Result<MicroShardId>
    where
        I: IntoTimestamp,
    {
        self.inner.generate_at(instant, self.shard_id)
    }

    /// The shard every identifier is stamped with.
    pub const fn shard_id(&self) -> ShardId {
        self.shard_id
    }

    /// The underlying unbound generator.
    pub const fn generator(&self) -> &MicroShardGenerator<T, R> {
        &self.inner
    }
}
