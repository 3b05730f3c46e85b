pub mod accrual;
pub use accrual::*;

pub mod cooldown;
pub use cooldown::*;

pub mod fees;
pub use fees::*;
