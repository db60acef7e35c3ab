use serde::{Deserialize, Serialize};

use finance::collateral;
use sdk::{
    cosmwasm_std::{Addr, Decimal, Order, Storage, Uint128},
    cw_storage_plus::Map,
    schemars::{self, JsonSchema},
};

use crate::{
    error::{Error, Result},
    params::Params,
};

/// A collateralized debt position of an owner in a single collateral denomination
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Csdt {
    pub owner: Addr,
    pub collateral_denom: String,
    pub collateral: Uint128,
    pub debt: Uint128,
}

/// Narrows down a listing of positions
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CsdtFilter {
    pub collateral_denom: Option<String>,
    /// Keep only the positions that would be below their liquidation ratio at this price
    pub under_collateralized_at: Option<Decimal>,
}

impl Csdt {
    const STORAGE: Map<(Addr, String), Csdt> = Map::new("csdt_positions");

    pub(crate) fn empty(owner: Addr, collateral_denom: String) -> Self {
        Self {
            owner,
            collateral_denom,
            collateral: Uint128::zero(),
            debt: Uint128::zero(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.collateral.is_zero() && self.debt.is_zero()
    }

    pub fn may_load(storage: &dyn Storage, owner: &Addr, denom: &str) -> Result<Option<Self>> {
        Self::STORAGE
            .may_load(storage, (owner.clone(), denom.to_owned()))
            .map_err(Into::into)
    }

    pub fn load(storage: &dyn Storage, owner: &Addr, denom: &str) -> Result<Self> {
        Self::may_load(storage, owner, denom).and_then(|may_csdt| {
            may_csdt.ok_or_else(|| Error::CsdtNotFound(owner.clone(), denom.to_owned()))
        })
    }

    /// Persist a non-empty position or delete an empty one
    pub(crate) fn store(&self, storage: &mut dyn Storage) -> Result<()> {
        let key = (self.owner.clone(), self.collateral_denom.clone());
        if self.is_empty() {
            Self::STORAGE.remove(storage, key);
            Ok(())
        } else {
            Self::STORAGE.save(storage, key, self).map_err(Into::into)
        }
    }

    /// All positions matching `filter`, in storage key order
    pub fn list(storage: &dyn Storage, filter: &CsdtFilter) -> Result<Vec<Self>> {
        let params = Params::load(storage)?;
        Self::STORAGE
            .range(storage, None, None, Order::Ascending)
            .map(|record| record.map(|(_, csdt)| csdt).map_err(Error::from))
            .filter(|may_csdt| {
                may_csdt
                    .as_ref()
                    .map_or(true, |csdt| filter.matches(&params, csdt))
            })
            .collect()
    }
}

impl CsdtFilter {
    fn matches(&self, params: &Params, csdt: &Csdt) -> bool {
        let denom_matches = self
            .collateral_denom
            .as_ref()
            .map_or(true, |denom| denom == &csdt.collateral_denom);
        denom_matches
            && self.under_collateralized_at.map_or(true, |price| {
                params
                    .collateral(&csdt.collateral_denom)
                    .is_some_and(|collateral_params| {
                        collateral::is_below_ratio(
                            csdt.collateral,
                            price,
                            csdt.debt,
                            collateral_params.liquidation_ratio,
                        )
                    })
            })
    }
}
