use serde::{Deserialize, Serialize};

use sdk::{
    cosmwasm_std::{Decimal, Storage, Uint128},
    cw_storage_plus::Item,
    schemars::{self, JsonSchema},
};

use crate::error::{Error, Result};

/// Governance controlled risk parameters of a collateral denomination
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CollateralParams {
    pub denom: String,
    /// The minimum value of the collateral per unit of debt
    pub liquidation_ratio: Decimal,
    pub liquidation_penalty: Decimal,
    /// The maximum total debt of all positions of this collateral
    pub debt_limit: Uint128,
    /// The maximum total collateral locked in positions
    pub collateral_limit: Uint128,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Params {
    pub stable_denom: String,
    pub global_debt_limit: Uint128,
    pub collateral_params: Vec<CollateralParams>,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            stable_denom: "ucsdt".into(),
            global_debt_limit: Uint128::zero(),
            collateral_params: vec![],
        }
    }
}

impl Params {
    const STORAGE: Item<Params> = Item::new("csdt_params");

    pub fn load(storage: &dyn Storage) -> Result<Self> {
        Self::STORAGE.load(storage).map_err(Into::into)
    }

    /// Validate and persist, the collateral parameters are kept sorted by denomination
    pub fn store(mut self, storage: &mut dyn Storage) -> Result<()> {
        self.validate()?;
        self.collateral_params
            .sort_by(|left, right| left.denom.cmp(&right.denom));
        Self::STORAGE.save(storage, &self).map_err(Into::into)
    }

    pub fn collateral(&self, denom: &str) -> Option<&CollateralParams> {
        self.collateral_params
            .iter()
            .find(|params| params.denom == denom)
    }

    pub fn validate(&self) -> Result<()> {
        if self.stable_denom.is_empty() {
            return Err(Error::InvalidParams("the stable denom is empty".into()));
        }
        self.collateral_params
            .iter()
            .enumerate()
            .try_for_each(|(idx, params)| {
                params.validate(&self.stable_denom)?;
                if self.collateral_params[..idx]
                    .iter()
                    .any(|prev| prev.denom == params.denom)
                {
                    Err(Error::InvalidParams(format!(
                        "duplicate collateral '{}'",
                        params.denom
                    )))
                } else {
                    Ok(())
                }
            })
    }
}

impl CollateralParams {
    fn validate(&self, stable_denom: &str) -> Result<()> {
        if self.denom.is_empty() {
            Err(Error::InvalidParams("a collateral denom is empty".into()))
        } else if self.denom == stable_denom {
            Err(Error::InvalidParams(format!(
                "the stable denom '{}' cannot be a collateral",
                stable_denom
            )))
        } else if self.liquidation_ratio.is_zero() {
            Err(Error::InvalidParams(format!(
                "zero liquidation ratio of '{}'",
                self.denom
            )))
        } else if self.liquidation_penalty >= Decimal::one() {
            Err(Error::InvalidParams(format!(
                "the liquidation penalty of '{}' should be below one",
                self.denom
            )))
        } else {
            Ok(())
        }
    }
}
