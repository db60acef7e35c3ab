use std::fmt::Debug;

use thiserror::Error;

use sdk::cosmwasm_std::{Addr, Api, Coin, OverflowError, StdError, Uint128};

use crate::bank::Permission;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("[Platform] Account '{account}' holds {available} but {needed} is needed")]
    InsufficientFunds {
        account: Addr,
        needed: Coin,
        available: Coin,
    },

    #[error("[Platform] Account '{0}' is not a module account")]
    UnknownModuleAccount(Addr),

    #[error("[Platform] Module account '{0}' lacks the {1:?} permission")]
    MissingPermission(Addr, Permission),

    #[error("[Platform] [OverflowError] {0}")]
    Overflow(#[from] OverflowError),

    #[error("[Platform] [Std] {0}")]
    CosmWasmError(#[from] StdError),
}

impl Error {
    pub fn insufficient_funds(account: &Addr, needed: &Coin, available: Uint128) -> Self {
        Self::InsufficientFunds {
            account: account.clone(),
            needed: needed.clone(),
            available: Coin::new(available, needed.denom.clone()),
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;

pub fn log<Err>(api: &dyn Api) -> impl FnOnce(&Err) + '_
where
    Err: Debug,
{
    |err| api.debug(&format!("{:?}", err))
}
