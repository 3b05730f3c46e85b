pub mod token;
pub use token::*;

pub mod yield_position;
pub use yield_position::*;

use crate::error::ErrorCode;
use anchor_lang::prelude::*;

/// Cluster clock in UNIX seconds.
pub fn current_timestamp() -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    u64::try_from(now).map_err(|_| error!(ErrorCode::InvalidTimestamp))
}
