mod civil;
mod format;
mod parse;

pub use civil::{days_in_month, is_leap_year};
pub use format::*;
pub use parse::*;
