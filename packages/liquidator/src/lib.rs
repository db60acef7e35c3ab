pub use crate::{
    engine::{Liquidator, Modules, Seizure, Settlement},
    params::{CollateralAuctionParams, Params},
    seized::SeizedDebt,
};

mod debt_auctions;
mod engine;
pub mod error;
mod params;
mod seized;
