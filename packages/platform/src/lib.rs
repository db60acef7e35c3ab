pub mod bank;
pub mod emit;
pub mod error;
