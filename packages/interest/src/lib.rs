pub use crate::{
    engine::InterestEngine,
    minted::MintedTally,
    params::Params,
    state::{AssetRate, InterestAsset, InterestState},
};

mod engine;
pub mod error;
mod minted;
mod params;
mod state;
