use thiserror::Error;

use sdk::cosmwasm_std::{OverflowError, StdError};

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("[Interest] Invalid parameters. Cause: {0}")]
    InvalidParams(String),

    #[error("[Interest] {0}")]
    Finance(#[from] finance::error::Error),

    #[error("[Interest] {0}")]
    Platform(#[from] platform::error::Error),

    #[error("[Interest] [OverflowError] {0}")]
    Overflow(#[from] OverflowError),

    #[error("[Interest] [Std] {0}")]
    Std(#[from] StdError),
}

impl Error {
    pub const CODESPACE: &'static str = "interest";

    pub fn code(&self) -> u32 {
        match self {
            Self::InvalidParams(_) => 1,
            Self::Finance(finance::error::Error::BrokenInvariant(_, _)) => 2,
            Self::Finance(_) | Self::Platform(_) | Self::Overflow(_) | Self::Std(_) => 3,
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
