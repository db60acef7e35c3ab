use sdk::cosmwasm_std::{Decimal, Storage, Timestamp};

use crate::error::Result;

pub use feed::{PostedPrice, PriceFeeds};

pub mod error;
mod feed;

/// Source of collateral prices quoted in the stable denomination
pub trait PriceOracle {
    /// The current price of `denom`, `None` if no unexpired price is known
    fn current_price(
        &self,
        storage: &dyn Storage,
        now: Timestamp,
        denom: &str,
    ) -> Result<Option<Decimal>>;
}

impl<T> PriceOracle for &T
where
    T: PriceOracle + ?Sized,
{
    fn current_price(
        &self,
        storage: &dyn Storage,
        now: Timestamp,
        denom: &str,
    ) -> Result<Option<Decimal>> {
        (**self).current_price(storage, now, denom)
    }
}
