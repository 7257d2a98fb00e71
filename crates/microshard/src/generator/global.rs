//! Process-wide generation and inspection entry points.
//!
//! Generation reads the host wall clock and draws from the calling thread's
//! [`ThreadRandom`]. Nothing is shared between threads except the (stateless)
//! generator itself, so calls never contend.
//!
//! # Example
//! ```rust
//! use microshard::{generate, generate_at, iso_time_of, shard_id_of, timestamp_of};
//!
//! let id = generate(1_u32).unwrap();
//! assert_eq!(shard_id_of(id), 1);
//!
//! let backfilled = generate_at("2024-02-29T10:00:00Z", 1_u32).unwrap();
//! assert_eq!(timestamp_of(backfilled), 1_709_200_800_000_000);
//! assert_eq!(iso_time_of(backfilled), "2024-02-29T10:00:00.000000Z");
//! assert!(backfilled < id);
//! ```
//!
//! [`ThreadRandom`]: crate::ThreadRandom

use crate::{IsoFormatter, MicroShardId};

#[cfg(feature = "std")]
use crate::{
    Error, IntoTimestamp, MicroShardGenerator, Result, ShardId, SystemClock, ThreadRandom,
};

/// The generator behind [`generate`] and [`generate_at`].
#[cfg(feature = "std")]
static GENERATOR: MicroShardGenerator<SystemClock, ThreadRandom> =
    MicroShardGenerator::new(SystemClock, ThreadRandom);

/// Generates an identifier for `shard_id` at the current wall-clock time.
///
/// # Errors
///
/// See [`MicroShardGenerator::generate`].
#[cfg(feature = "std")]
pub fn generate<S>(shard_id: S) -> Result<MicroShardId>
where
    S: TryInto<ShardId>,
    Error: From<S::Error>,
{
    GENERATOR.generate(shard_id)
}

/// Generates an identifier for `shard_id` at an explicit instant
/// (microseconds, ISO-8601 text, `Duration` or `SystemTime`).
///
/// # Errors
///
/// See [`MicroShardGenerator::generate_at`].
#[cfg(feature = "std")]
pub fn generate_at<I, S>(instant: I, shard_id: S) -> Result<MicroShardId>
where
    I: IntoTimestamp,
    S: TryInto<ShardId>,
    Error: From<S::Error>,
{
    GENERATOR.generate_at(instant, shard_id)
}

/// The shard id embedded in `id`.
#[must_use]
pub const fn shard_id_of(id: MicroShardId) -> u32 {
    id.shard_id()
}

/// The timestamp embedded in `id`, in microseconds since the Unix epoch.
#[must_use]
pub const fn timestamp_of(id: MicroShardId) -> u64 {
    id.timestamp()
}

/// The timestamp embedded in `id`, rendered as ISO-8601 UTC.
#[must_use]
pub fn iso_time_of(id: MicroShardId) -> IsoFormatter {
    id.iso_time()
}
