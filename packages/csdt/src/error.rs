use std::any::type_name;

use thiserror::Error;

use sdk::cosmwasm_std::{Addr, OverflowError, StdError};

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("[Csdt] The collateral would not cover the debt at the liquidation ratio of '{0}'")]
    InsufficientCollateral(String),

    #[error("[Csdt] The repayment exceeds the debt of the position")]
    RepayExceedsDebt,

    #[error("[Csdt] The debt ceiling of '{0}' would be exceeded")]
    ExceedsDebtCeiling(String),

    #[error("[Csdt] The collateral ceiling of '{0}' would be exceeded")]
    ExceedsCollateralCeiling(String),

    #[error("[Csdt] No current price of '{0}'")]
    OracleStale(String),

    #[error("[Csdt] '{0}' is not an accepted collateral")]
    InvalidDenom(String),

    #[error("[Csdt] Both the collateral and the debt changes are zero")]
    ZeroDelta,

    #[error("[Csdt] No position of '{0}' collateralized with '{1}'")]
    CsdtNotFound(Addr, String),

    #[error("[Csdt] Insufficient funds. Cause: {0}")]
    InsufficientFunds(platform::error::Error),

    #[error("[Csdt] Invalid parameters. Cause: {0}")]
    InvalidParams(String),

    #[error("[Csdt] Programming error or invalid serialized object of '{0}' type, cause '{1}'")]
    BrokenInvariant(String, String),

    #[error("[Csdt] [OverflowError] {0}")]
    Overflow(#[from] OverflowError),

    #[error("[Csdt] {0}")]
    Platform(#[from] platform::error::Error),

    #[error("[Csdt] {0}")]
    Oracle(#[from] oracle_platform::error::Error),

    #[error("[Csdt] {0}")]
    Finance(#[from] finance::error::Error),

    #[error("[Csdt] [Std] {0}")]
    Std(#[from] StdError),
}

impl Error {
    pub const CODESPACE: &'static str = "csdt";

    pub fn broken_invariant_err<T>(msg: &str) -> Self {
        Self::BrokenInvariant(type_name::<T>().into(), msg.into())
    }

    pub fn code(&self) -> u32 {
        match self {
            Self::InsufficientCollateral(_) => 1,
            Self::RepayExceedsDebt => 2,
            Self::ExceedsDebtCeiling(_) => 3,
            Self::ExceedsCollateralCeiling(_) => 4,
            Self::OracleStale(_) => 5,
            Self::InvalidDenom(_) => 6,
            Self::ZeroDelta => 7,
            Self::CsdtNotFound(_, _) => 8,
            Self::InsufficientFunds(_) => 9,
            Self::InvalidParams(_) => 10,
            Self::BrokenInvariant(_, _) => 11,
            Self::Overflow(_)
            | Self::Platform(_)
            | Self::Oracle(_)
            | Self::Finance(_)
            | Self::Std(_) => 12,
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
