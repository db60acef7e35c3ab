pub use crate::{
    ledger::CsdtLedger,
    params::{CollateralParams, Params},
    position::{Csdt, CsdtFilter},
    totals::{CollateralState, GlobalDebt},
};

pub mod error;
mod ledger;
mod params;
mod position;
mod totals;
