use crate::{Error, MAX_RANDOM, RandSource, Result};
use core::cell::RefCell;
use rand::{RngCore, SeedableRng, rngs::SmallRng};

thread_local! {
    /// Per-thread generator, seeded from the OS on first use.
    static THREAD_RNG: RefCell<Option<SmallRng>> = const { RefCell::new(None) };
}

/// A `RandSource` backed by a thread-local, OS-seeded PRNG.
///
/// Each OS thread lazily seeds its own generator the first time it draws, so
/// calls from multiple threads never contend and never share state. This type
/// does **not** store the RNG itself; it is a zero-sized handle that reaches
/// the calling thread's generator on each call, and may be freely shared
/// across threads.
///
/// The generator is a fast non-cryptographic PRNG. The random tail exists to
/// separate identifiers minted in the same microsecond on the same shard; it
/// is not a secret.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource for ThreadRandom {
    fn try_rand(&self) -> Result<u64> {
        THREAD_RNG.with(|cell| {
            let mut slot = cell.borrow_mut();
            if slot.is_none() {
                *slot = Some(seed()?);
            }
            slot.as_mut()
                .map(|rng| rng.next_u64() & MAX_RANDOM)
                .ok_or(Error::EntropyUnavailable)
        })
    }
}

fn seed() -> Result<SmallRng> {
    match SmallRng::try_from_os_rng() {
        Ok(rng) => {
            #[cfg(feature = "tracing")]
            tracing::debug!("seeded thread-local random source");
            Ok(rng)
        }
        Err(_e) => {
            #[cfg(feature = "tracing")]
            tracing::warn!("failed to seed random source from the OS: {_e}");
            Err(Error::EntropyUnavailable)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_fit_in_36_bits() {
        let rng = ThreadRandom;
        for _ in 0..10_000 {
            assert!(rng.try_rand().unwrap() <= MAX_RANDOM);
        }
    }

    #[test]
    fn draws_vary() {
        let rng = ThreadRandom;
        let first = rng.try_rand().unwrap();
        assert!((0..64).any(|_| rng.try_rand().unwrap() != first));
    }

    #[test]
    fn threads_seed_independently() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| ThreadRandom.try_rand().unwrap()))
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap() <= MAX_RANDOM);
        }
    }
}
