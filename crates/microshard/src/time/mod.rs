mod fixed;
mod interface;
#[cfg(feature = "std")]
mod mono_clock;
#[cfg(feature = "std")]
mod system;
mod timestamp;

pub use fixed::*;
pub use interface::*;
#[cfg(feature = "std")]
pub use mono_clock::*;
#[cfg(feature = "std")]
pub use system::*;
pub use timestamp::*;
