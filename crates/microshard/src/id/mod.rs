mod layout;
mod shard;

pub use layout::*;
pub use shard::*;
