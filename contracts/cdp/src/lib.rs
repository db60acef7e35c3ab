pub mod api;
pub mod contract;
pub mod error;
mod event;
mod state;
