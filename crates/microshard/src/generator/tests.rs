use crate::{
    Error, FixedClock, MAX_RANDOM, MAX_TIMESTAMP, MicroShardGenerator, MicroShardId,
    MonotonicClock, RandSource, Result, ShardGenerator, ShardId, SystemClock, ThreadRandom,
    TimeSource, generate, generate_at, iso_time_of, shard_id_of, timestamp_of,
};
use core::cell::Cell;
use std::collections::HashSet;
use std::thread::scope;

struct MockTime {
    micros: u64,
}

impl TimeSource for MockTime {
    fn current_micros(&self) -> u64 {
        self.micros
    }
}

struct MockRand {
    rand: u64,
}

impl RandSource for MockRand {
    fn try_rand(&self) -> Result<u64> {
        Ok(self.rand)
    }
}

/// Counts how often it is asked for randomness.
#[derive(Default)]
struct CountingRand {
    calls: Cell<usize>,
}

impl RandSource for CountingRand {
    fn try_rand(&self) -> Result<u64> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.calls.get() as u64)
    }
}

struct NoEntropy;

impl RandSource for NoEntropy {
    fn try_rand(&self) -> Result<u64> {
        Err(Error::EntropyUnavailable)
    }
}

/// Steps through a fixed list of readings, one per call.
struct StepTime {
    values: Vec<u64>,
    index: Cell<usize>,
}

impl TimeSource for StepTime {
    fn current_micros(&self) -> u64 {
        let i = self.index.get();
        self.index.set(i + 1);
        self.values[i]
    }
}

#[test]
fn composes_time_shard_and_random() {
    let generator = MicroShardGenerator::new(
        MockTime {
            micros: 1_672_531_200_000_000,
        },
        MockRand { rand: 0 },
    );
    let id = generator.generate(1_u32).unwrap();
    assert_eq!(id.to_string(), "17c4a210-3500-8000-8000-001000000000");
    assert_eq!(timestamp_of(id), 1_672_531_200_000_000);
    assert_eq!(shard_id_of(id), 1);
}

#[test]
fn random_is_masked() {
    let generator = MicroShardGenerator::new(MockTime { micros: 5 }, MockRand { rand: u64::MAX });
    let id = generator.generate(3_u32).unwrap();
    assert_eq!(id.random(), MAX_RANDOM);
    assert!(id.is_valid());
}

#[test]
fn shard_is_rejected_before_touching_sources() {
    let generator = MicroShardGenerator::new(MockTime { micros: 5 }, CountingRand::default());
    assert_eq!(
        generator.generate(4_294_967_296_u64),
        Err(Error::ShardOutOfRange {
            value: 4_294_967_296
        })
    );
    assert_eq!(
        generator.generate(-1_i32),
        Err(Error::ShardOutOfRange { value: -1 })
    );
    assert_eq!(
        generator.generate_at(0_u64, -7_i64),
        Err(Error::ShardOutOfRange { value: -7 })
    );
    assert_eq!(generator.rng().calls.get(), 0);
}

#[test]
fn accepts_full_shard_range() {
    let generator = MicroShardGenerator::new(MockTime { micros: 5 }, MockRand { rand: 9 });
    assert_eq!(generator.generate(0_i64).unwrap().shard_id(), 0);
    assert_eq!(
        generator.generate(4_294_967_295_i64).unwrap().shard_id(),
        u32::MAX
    );
    assert_eq!(generator.generate(ShardId::MAX).unwrap().shard_id(), u32::MAX);
}

#[test]
fn clock_overflow_propagates() {
    let generator = MicroShardGenerator::new(
        MockTime {
            micros: MAX_TIMESTAMP + 1,
        },
        MockRand { rand: 0 },
    );
    assert_eq!(
        generator.generate(1_u32),
        Err(Error::TimeOverflow {
            micros: MAX_TIMESTAMP + 1
        })
    );
    let generator = MicroShardGenerator::new(MockTime { micros: MAX_TIMESTAMP }, MockRand { rand: 0 });
    assert_eq!(generator.generate(1_u32).unwrap().timestamp(), MAX_TIMESTAMP);
}

#[test]
fn entropy_failure_propagates() {
    let generator = MicroShardGenerator::new(MockTime { micros: 5 }, NoEntropy);
    assert_eq!(generator.generate(1_u32), Err(Error::EntropyUnavailable));
    assert_eq!(
        generator.generate_at(10_u64, 1_u32),
        Err(Error::EntropyUnavailable)
    );
}

#[test]
fn generate_at_bypasses_the_clock() {
    let time = StepTime {
        values: vec![],
        index: Cell::new(0),
    };
    let generator = MicroShardGenerator::new(time, MockRand { rand: 1 });
    let id = generator
        .generate_at("2023-01-01T12:00:00.123456Z", 9_u32)
        .unwrap();
    assert_eq!(id.timestamp(), 1_672_574_400_123_456);
    assert_eq!(iso_time_of(id), "2023-01-01T12:00:00.123456Z");
    assert_eq!(generator.time().index.get(), 0);
}

#[test]
fn generate_at_reports_bad_instants() {
    let generator = MicroShardGenerator::new(MockTime { micros: 0 }, MockRand { rand: 0 });
    assert_eq!(
        generator.generate_at("2023-01-01", 1_u32),
        Err(Error::BadLength { len: 10 })
    );
    assert_eq!(
        generator.generate_at(MAX_TIMESTAMP + 1, 1_u32),
        Err(Error::TimeOverflow {
            micros: MAX_TIMESTAMP + 1
        })
    );
}

#[test]
fn later_readings_sort_later() {
    let time = StepTime {
        values: vec![100, 101, 101, 250],
        index: Cell::new(0),
    };
    // the random tail decreases; time alone must decide the order
    struct Descending(Cell<u64>);
    impl RandSource for Descending {
        fn try_rand(&self) -> Result<u64> {
            self.0.set(self.0.get() - 1);
            Ok(self.0.get())
        }
    }
    let generator = MicroShardGenerator::new(time, Descending(Cell::new(MAX_RANDOM)));

    let a = generator.generate(u32::MAX).unwrap();
    let b = generator.generate(0_u32).unwrap();
    let c = generator.generate(0_u32).unwrap();
    let d = generator.generate(0_u32).unwrap();
    assert!(a < b);
    // same microsecond and shard: the tail breaks the tie
    assert_eq!(b.timestamp(), c.timestamp());
    assert!(c < b);
    assert!(c < d);
    assert!(a.to_string() < b.to_string());
    assert!(c.to_string() < d.to_string());
}

#[test]
fn shard_generator_stamps_its_shard() {
    let generator =
        ShardGenerator::new(MockTime { micros: 77 }, MockRand { rand: 3 }, 123_456_u32).unwrap();
    assert_eq!(generator.shard_id(), ShardId::new(123_456));
    let id = generator.next_id().unwrap();
    assert_eq!(id.decode(), (77, 123_456));

    let old = generator.at(12_u64).unwrap();
    assert_eq!(old.decode(), (12, 123_456));
    assert!(old < id);
    assert_eq!(generator.generator().time().micros, 77);
}

#[test]
fn shard_generator_rejects_bad_shard() {
    assert!(matches!(
        ShardGenerator::new(MockTime { micros: 0 }, MockRand { rand: 0 }, -1_i32),
        Err(Error::ShardOutOfRange { value: -1 })
    ));
}

#[test]
fn fixed_clock_backfills() {
    let clock = FixedClock::from_iso("2000-02-29T12:30:45Z").unwrap();
    let generator = MicroShardGenerator::new(clock, ThreadRandom);
    let a = generator.generate(1_u32).unwrap();
    let b = generator.generate(1_u32).unwrap();
    assert_eq!(a.timestamp(), b.timestamp());
    assert_eq!(a.iso_time(), "2000-02-29T12:30:45.000000Z");
}

#[test]
fn live_clocks_produce_current_ids() {
    let before = SystemClock.current_micros();
    let system = MicroShardGenerator::new(SystemClock, ThreadRandom);
    let mono = MicroShardGenerator::new(MonotonicClock::new(), ThreadRandom);
    let a = system.generate(1_u32).unwrap();
    let b = mono.generate(1_u32).unwrap();
    assert!(a.timestamp() >= before);
    assert!(b.timestamp().abs_diff(a.timestamp()) < 5_000_000);
}

#[test]
fn free_functions_roundtrip() {
    let id = generate(4_294_967_295_u64).unwrap();
    assert_eq!(shard_id_of(id), u32::MAX);
    assert_eq!(MicroShardId::parse(id.encode_hex().as_str()), Ok(id));
    assert_eq!(
        generate(4_294_967_296_u64),
        Err(Error::ShardOutOfRange {
            value: 4_294_967_296
        })
    );

    let backfilled = generate_at("2024-02-29T00:00:00", 2_u8).unwrap();
    assert_eq!(iso_time_of(backfilled), "2024-02-29T00:00:00.000000Z");
    assert_eq!(
        generate_at("2023-02-29T00:00:00", 2_u8),
        Err(Error::OutOfRange {
            field: crate::IsoField::Day
        })
    );
}

#[test]
fn threads_generate_distinct_ids() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 2_000;

    let generator = MicroShardGenerator::new(FixedClock::new(1_000_000), ThreadRandom);
    let ids: Vec<MicroShardId> = scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(|| {
                    (0..PER_THREAD)
                        .map(|_| generator.generate(1_u32).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect()
    });

    // same microsecond and shard everywhere; only the random tail separates them
    let unique: HashSet<_> = ids.iter().collect();
    assert!(unique.len() >= ids.len() - 1);
    assert!(ids.iter().all(|id| id.decode() == (1_000_000, 1)));
}
