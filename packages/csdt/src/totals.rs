use serde::{Deserialize, Serialize};

use sdk::{
    cosmwasm_std::{Storage, Uint128},
    cw_storage_plus::{Item, Map},
    schemars::{self, JsonSchema},
};

use crate::error::{Error, Result};

/// Running totals of all positions collateralized with a denomination
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CollateralState {
    pub denom: String,
    pub total_debt: Uint128,
    pub total_collateral: Uint128,
}

impl CollateralState {
    const STORAGE: Map<String, CollateralState> = Map::new("csdt_collateral_states");

    pub fn load(storage: &dyn Storage, denom: &str) -> Result<Self> {
        Self::STORAGE
            .may_load(storage, denom.to_owned())
            .map(|may_state| {
                may_state.unwrap_or_else(|| Self {
                    denom: denom.to_owned(),
                    total_debt: Uint128::zero(),
                    total_collateral: Uint128::zero(),
                })
            })
            .map_err(Into::into)
    }

    pub(crate) fn store(&self, storage: &mut dyn Storage) -> Result<()> {
        Self::STORAGE
            .save(storage, self.denom.clone(), self)
            .map_err(Into::into)
    }

    /// Replace the contribution of a position with its new amounts
    pub(crate) fn replace(
        mut self,
        old_collateral: Uint128,
        old_debt: Uint128,
        new_collateral: Uint128,
        new_debt: Uint128,
    ) -> Result<Self> {
        self.total_collateral = self
            .total_collateral
            .checked_sub(old_collateral)
            .map_err(|_| Error::broken_invariant_err::<Self>("collateral total below a position"))?
            .checked_add(new_collateral)?;
        self.total_debt = self
            .total_debt
            .checked_sub(old_debt)
            .map_err(|_| Error::broken_invariant_err::<Self>("debt total below a position"))?
            .checked_add(new_debt)?;
        Ok(self)
    }
}

/// The stable debt outstanding, seized but not yet settled debt included
pub struct GlobalDebt;

impl GlobalDebt {
    const STORAGE: Item<Uint128> = Item::new("csdt_global_debt");

    pub fn load(storage: &dyn Storage) -> Result<Uint128> {
        Self::STORAGE
            .may_load(storage)
            .map(Option::unwrap_or_default)
            .map_err(Into::into)
    }

    pub fn store(storage: &mut dyn Storage, debt: Uint128) -> Result<()> {
        Self::STORAGE.save(storage, &debt).map_err(Into::into)
    }

    /// Account for settled seized debt
    pub fn reduce(storage: &mut dyn Storage, amount: Uint128) -> Result<Uint128> {
        Self::load(storage)?
            .checked_sub(amount)
            .map_err(|_| Error::broken_invariant_err::<Self>("settling more than the global debt"))
            .and_then(|debt| Self::store(storage, debt).map(|()| debt))
    }
}
