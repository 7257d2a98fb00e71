mod basic;
mod global;
mod shard;
#[cfg(all(test, feature = "std"))]
mod tests;

pub use basic::*;
pub use global::*;
pub use shard::*;
