use std::result::Result as StdResult;

use thiserror::Error;

use sdk::cosmwasm_std::StdError;

pub type Result<T> = StdResult<T, Error>;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("[Oracle] A zero price of '{0}' is not acceptable")]
    ZeroPrice(String),

    #[error("[Oracle] The price of '{0}' expires at {1} which is not after {2}")]
    AlreadyExpired(String, String, String),

    #[error("[Oracle] [Std] {0}")]
    Std(#[from] StdError),
}
