use crate::Result;

/// A source of random bits for the identifier's 36-bit tail.
///
/// This abstraction allows you to plug in a real random source or a mocked
/// random source in tests. Only the low 36 bits of each draw are used.
///
/// # Example
/// ```
/// use microshard::{RandSource, Result};
///
/// struct FixedRand;
/// impl RandSource for FixedRand {
///     fn try_rand(&self) -> Result<u64> {
///         Ok(1234)
///     }
/// }
///
/// let rng = FixedRand;
/// assert_eq!(rng.try_rand(), Ok(1234));
/// ```
pub trait RandSource {
    /// Returns a random integer.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EntropyUnavailable`] if the source cannot
    /// produce randomness.
    fn try_rand(&self) -> Result<u64>;
}

impl<R: RandSource + ?Sized> RandSource for &R {
    fn try_rand(&self) -> Result<u64> {
        (**self).try_rand()
    }
}
