use sdk::{
    cosmwasm_std::{Coin, Order, Storage, Uint128},
    cw_storage_plus::Map,
};

use crate::error::Result;

/// The cumulative amounts minted as interest
pub struct MintedTally;

impl MintedTally {
    const STORAGE: Map<String, Uint128> = Map::new("interest_minted");

    pub fn add(storage: &mut dyn Storage, minted: &[Coin]) -> Result<()> {
        minted.iter().try_for_each(|coin| {
            let total = Self::STORAGE
                .may_load(storage, coin.denom.clone())?
                .unwrap_or_default()
                .checked_add(coin.amount)?;
            Self::STORAGE
                .save(storage, coin.denom.clone(), &total)
                .map_err(Into::into)
        })
    }

    /// The totals ordered by denomination
    pub fn load(storage: &dyn Storage) -> Result<Vec<Coin>> {
        Self::STORAGE
            .range(storage, None, None, Order::Ascending)
            .map(|record| {
                record
                    .map(|(denom, amount)| Coin::new(amount, denom))
                    .map_err(Into::into)
            })
            .collect()
    }
}
