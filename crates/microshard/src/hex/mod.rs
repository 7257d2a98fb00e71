mod codec;
mod interface;

pub use codec::{BYTES_LEN, CANONICAL_LEN, SIMPLE_LEN};
pub use interface::*;
