use serde::{Deserialize, Serialize};

use sdk::{
    cosmwasm_std::{Storage, Uint128},
    cw_storage_plus::Item,
    schemars::{self, JsonSchema},
};

use crate::error::{Error, Result};

/// How much of a collateral goes into a single collateral auction
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CollateralAuctionParams {
    pub denom: String,
    pub auction_size: Uint128,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Params {
    /// The denomination minted to cover bad debt and bought back with surplus
    pub gov_denom: String,
    /// The stable amount raised by a debt auction
    pub debt_auction_size: Uint128,
    pub debt_auction_threshold: Uint128,
    /// The governance tokens minted as the initial lot of a debt auction
    pub debt_auction_lot: Uint128,
    /// The stable amount sold by a surplus auction
    pub surplus_auction_size: Uint128,
    pub surplus_auction_threshold: Uint128,
    pub collateral_params: Vec<CollateralAuctionParams>,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            gov_denom: "ugov".into(),
            debt_auction_size: Uint128::new(1_000),
            debt_auction_threshold: Uint128::new(1_000),
            debt_auction_lot: Uint128::new(10_000),
            surplus_auction_size: Uint128::new(1_000),
            surplus_auction_threshold: Uint128::new(1_000),
            collateral_params: vec![],
        }
    }
}

impl Params {
    const STORAGE: Item<Params> = Item::new("liquidator_params");

    pub fn load(storage: &dyn Storage) -> Result<Self> {
        Self::STORAGE.load(storage).map_err(Into::into)
    }

    pub fn store(&self, storage: &mut dyn Storage) -> Result<()> {
        self.validate()
            .and_then(|()| Self::STORAGE.save(storage, self).map_err(Into::into))
    }

    pub fn auction_size(&self, denom: &str) -> Result<Uint128> {
        self.collateral_params
            .iter()
            .find(|params| params.denom == denom)
            .map(|params| params.auction_size)
            .ok_or_else(|| Error::UnknownCollateral(denom.to_owned()))
    }

    /// The seized debt needed before a debt auction starts
    pub fn debt_auction_trigger(&self) -> Uint128 {
        self.debt_auction_threshold.max(self.debt_auction_size)
    }

    /// The surplus needed before a surplus auction starts
    pub fn surplus_auction_trigger(&self) -> Uint128 {
        self.surplus_auction_threshold.max(self.surplus_auction_size)
    }

    pub fn validate(&self) -> Result<()> {
        if self.gov_denom.is_empty() {
            return Err(Error::InvalidParams("the governance denom is empty".into()));
        }
        [
            ("debt auction size", self.debt_auction_size),
            ("debt auction lot", self.debt_auction_lot),
            ("surplus auction size", self.surplus_auction_size),
        ]
        .into_iter()
        .try_for_each(|(name, amount)| {
            if amount.is_zero() {
                Err(Error::InvalidParams(format!("zero {}", name)))
            } else {
                Ok(())
            }
        })?;
        self.collateral_params
            .iter()
            .enumerate()
            .try_for_each(|(idx, params)| {
                if params.auction_size.is_zero() {
                    Err(Error::InvalidParams(format!(
                        "zero auction size of '{}'",
                        params.denom
                    )))
                } else if self.collateral_params[..idx]
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
