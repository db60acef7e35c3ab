pub mod collateral;
pub mod delta;
pub mod duration;
pub mod error;
pub mod interest;
