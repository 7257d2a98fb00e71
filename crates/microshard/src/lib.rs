#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

mod error;
mod generator;
mod hex;
mod id;
mod iso;
mod rand;
#[cfg(feature = "serde")]
pub mod serde;
mod time;
#[cfg(feature = "uuid")]
mod uuid;

pub use crate::error::*;
pub use crate::generator::*;
pub use crate::hex::*;
pub use crate::id::*;
pub use crate::iso::*;
pub use crate::rand::*;
pub use crate::time::*;
