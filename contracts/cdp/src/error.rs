use thiserror::Error;

use sdk::cosmwasm_std::StdError;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("[Cdp] {0}")]
    Csdt(#[from] csdt::error::Error),

    #[error("[Cdp] {0}")]
    Auction(#[from] auction::error::Error),

    #[error("[Cdp] {0}")]
    Liquidator(#[from] liquidator::error::Error),

    #[error("[Cdp] {0}")]
    Interest(#[from] interest::error::Error),

    #[error("[Cdp] {0}")]
    Oracle(#[from] oracle_platform::error::Error),

    #[error("[Cdp] {0}")]
    Platform(#[from] platform::error::Error),

    #[error("[Cdp] The protocol keeps its own ledger, no funds may be attached")]
    NonPayable,

    #[error("[Cdp] [Std] {0}")]
    Std(#[from] StdError),
}

impl Error {
    pub const CODESPACE: &'static str = "cdp";

    /// The codespace and the code reported to the caller
    pub fn code(&self) -> (&'static str, u32) {
        match self {
            Self::Csdt(err) => (csdt::error::Error::CODESPACE, err.code()),
            Self::Auction(err) => (auction::error::Error::CODESPACE, err.code()),
            Self::Liquidator(err) => err.code(),
            Self::Interest(err) => (interest::error::Error::CODESPACE, err.code()),
            Self::NonPayable => (Self::CODESPACE, 1),
            Self::Oracle(_) => (Self::CODESPACE, 2),
            Self::Platform(platform::error::Error::InsufficientFunds { .. }) => {
                (Self::CODESPACE, 3)
            }
            Self::Platform(_) | Self::Std(_) => (Self::CODESPACE, 4),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
