use std::any::type_name;

use thiserror::Error;

use sdk::cosmwasm_std::{OverflowError, StdError};

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("[Liquidator] The position is not under-collateralized")]
    NotUndercollateralized,

    #[error("[Liquidator] Not enough seized debt to start a debt auction, available {available}, needed {needed}")]
    InsufficientDebt { available: String, needed: String },

    #[error("[Liquidator] Not enough surplus to start a surplus auction, available {available}, needed {needed}")]
    InsufficientSurplus { available: String, needed: String },

    #[error("[Liquidator] No collateral auction size of '{0}'")]
    UnknownCollateral(String),

    #[error("[Liquidator] Invalid parameters. Cause: {0}")]
    InvalidParams(String),

    #[error("[Liquidator] Programming error or invalid serialized object of '{0}' type, cause '{1}'")]
    BrokenInvariant(String, String),

    #[error("[Liquidator] {0}")]
    Csdt(#[from] csdt::error::Error),

    #[error("[Liquidator] {0}")]
    Auction(#[from] auction::error::Error),

    #[error("[Liquidator] [OverflowError] {0}")]
    Overflow(#[from] OverflowError),

    #[error("[Liquidator] {0}")]
    Platform(#[from] platform::error::Error),

    #[error("[Liquidator] {0}")]
    Oracle(#[from] oracle_platform::error::Error),

    #[error("[Liquidator] {0}")]
    Finance(#[from] finance::error::Error),

    #[error("[Liquidator] [Std] {0}")]
    Std(#[from] StdError),
}

impl Error {
    pub const CODESPACE: &'static str = "liquidator";

    pub fn broken_invariant_err<T>(msg: &str) -> Self {
        Self::BrokenInvariant(type_name::<T>().into(), msg.into())
    }

    /// The codespace and the code of the error, the engine errors keep their own
    pub fn code(&self) -> (&'static str, u32) {
        match self {
            Self::NotUndercollateralized => (Self::CODESPACE, 1),
            Self::InsufficientDebt { .. } => (Self::CODESPACE, 2),
            Self::InsufficientSurplus { .. } => (Self::CODESPACE, 3),
            Self::UnknownCollateral(_) => (Self::CODESPACE, 4),
            Self::InvalidParams(_) => (Self::CODESPACE, 5),
            Self::BrokenInvariant(_, _) => (Self::CODESPACE, 6),
            Self::Csdt(err) => (csdt::error::Error::CODESPACE, err.code()),
            Self::Auction(err) => (auction::error::Error::CODESPACE, err.code()),
            Self::Overflow(_)
            | Self::Platform(_)
            | Self::Oracle(_)
            | Self::Finance(_)
            | Self::Std(_) => (Self::CODESPACE, 7),
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
