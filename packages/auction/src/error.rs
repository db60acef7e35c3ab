use std::any::type_name;

use thiserror::Error;

use sdk::cosmwasm_std::{CheckedMultiplyFractionError, OverflowError, StdError};

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("[Auction] No auction with id {0}")]
    AuctionNotFound(u64),

    #[error("[Auction] The auction {0} is closed")]
    AuctionClosed(u64),

    #[error("[Auction] The auction {0} has not expired yet")]
    AuctionNotExpired(u64),

    #[error("[Auction] The offer does not improve enough on the current one")]
    BidTooLow,

    #[error("[Auction] The lot cannot be changed at this phase")]
    InvalidLot,

    #[error("[Auction] The bid cannot be changed at this phase")]
    InvalidBid,

    #[error("[Auction] The bid is above the maximum of {0}")]
    BidAboveMax(String),

    #[error("[Auction] Found denomination '{found}' expecting '{expected}'")]
    DenomMismatch { expected: String, found: String },

    #[error("[Auction] Zero lot")]
    InvalidAmount,

    #[error("[Auction] Insufficient funds. Cause: {0}")]
    InsufficientFunds(platform::error::Error),

    #[error("[Auction] Invalid parameters. Cause: {0}")]
    InvalidParams(String),

    #[error("[Auction] Programming error or invalid serialized object of '{0}' type, cause '{1}'")]
    BrokenInvariant(String, String),

    #[error("[Auction] [OverflowError] {0}")]
    Overflow(#[from] OverflowError),

    #[error("[Auction] [CheckedMultiplyFractionError] {0}")]
    Fraction(#[from] CheckedMultiplyFractionError),

    #[error("[Auction] {0}")]
    Platform(#[from] platform::error::Error),

    #[error("[Auction] [Std] {0}")]
    Std(#[from] StdError),
}

impl Error {
    pub const CODESPACE: &'static str = "auction";

    pub fn broken_invariant_err<T>(msg: &str) -> Self {
        Self::BrokenInvariant(type_name::<T>().into(), msg.into())
    }

    pub fn denom_mismatch(expected: &str, found: &str) -> Self {
        Self::DenomMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            Self::AuctionNotFound(_) => 1,
            Self::AuctionClosed(_) => 2,
            Self::AuctionNotExpired(_) => 3,
            Self::BidTooLow => 4,
            Self::InvalidLot => 5,
            Self::InvalidBid => 6,
            Self::BidAboveMax(_) => 7,
            Self::DenomMismatch { .. } => 8,
            Self::InvalidAmount => 9,
            Self::InsufficientFunds(_) => 10,
            Self::InvalidParams(_) => 11,
            Self::BrokenInvariant(_, _) => 12,
            Self::Overflow(_) | Self::Fraction(_) | Self::Platform(_) | Self::Std(_) => 13,
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
