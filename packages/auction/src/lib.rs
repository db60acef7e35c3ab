pub use crate::{
    auction::{Auction, AuctionKind},
    engine::AuctionEngine,
    params::Params,
};

mod auction;
mod bid;
mod engine;
pub mod error;
mod params;
