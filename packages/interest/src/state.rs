use serde::{Deserialize, Serialize};

use finance::{duration::Duration, interest};
use sdk::{
    cosmwasm_std::{Coin, Decimal, Decimal256, Storage, Timestamp, Uint128},
    cw_storage_plus::Item,
    schemars::{self, JsonSchema},
};

use crate::error::{Error, Result};

/// An asset whose supply bears interest
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct InterestAsset {
    pub denom: String,
    pub annual_rate: Decimal,
    /// The fraction of a token carried over from the previous accruals
    pub accum: Decimal256,
}

/// A governance request to set the annual rate of an asset
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AssetRate {
    pub denom: String,
    pub annual_rate: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct InterestState {
    pub last_applied_height: u64,
    pub last_applied_time: Timestamp,
    /// Sorted by denomination
    pub assets: Vec<InterestAsset>,
}

impl InterestState {
    const STORAGE: Item<InterestState> = Item::new("interest_state");

    /// The state of an interest accrual starting at `start`
    pub fn new(start: Timestamp, rates: Vec<AssetRate>) -> Result<Self> {
        Self {
            last_applied_height: 0,
            last_applied_time: start,
            assets: vec![],
        }
        .with_rates(rates)
    }

    pub fn load(storage: &dyn Storage) -> Result<Self> {
        Self::STORAGE.load(storage).map_err(Into::into)
    }

    pub fn store(&self, storage: &mut dyn Storage) -> Result<()> {
        Self::STORAGE.save(storage, self).map_err(Into::into)
    }

    /// Set the annual rates of the tracked assets
    pub fn update_assets(storage: &mut dyn Storage, rates: Vec<AssetRate>) -> Result<Self> {
        let state = Self::load(storage)?.with_rates(rates)?;
        state.store(storage).map(|()| state)
    }

    /// Replace the tracked assets keeping the carried fraction of those already tracked
    pub fn with_rates(self, rates: Vec<AssetRate>) -> Result<Self> {
        let mut assets = rates
            .into_iter()
            .map(|rate| InterestAsset {
                accum: self
                    .assets
                    .iter()
                    .find(|asset| asset.denom == rate.denom)
                    .map_or_else(Decimal256::zero, |asset| asset.accum),
                denom: rate.denom,
                annual_rate: rate.annual_rate,
            })
            .collect::<Vec<_>>();
        assets.sort_by(|left, right| left.denom.cmp(&right.denom));
        if let Some(pair) = assets.windows(2).find(|pair| pair[0].denom == pair[1].denom) {
            return Err(Error::InvalidParams(format!(
                "duplicate interest asset '{}'",
                pair[0].denom
            )));
        }
        Ok(Self { assets, ..self })
    }

    /// Accrue interest on `supplies` up to `now`
    ///
    /// Returns the next state and the coins to mint, zero amounts left out.
    /// Nothing accrues if `now` is not after the last accrual.
    pub fn accrue<S>(&self, now: Timestamp, supply_of: S) -> Result<(Self, Vec<Coin>)>
    where
        S: Fn(&str) -> Result<Uint128>,
    {
        if now <= self.last_applied_time {
            return Ok((self.clone(), vec![]));
        }
        let period = Duration::between(self.last_applied_time, now);

        let mut minted = vec![];
        let assets = self
            .assets
            .iter()
            .map(|asset| -> Result<InterestAsset> {
                let accrual = interest::accrue(
                    asset.annual_rate,
                    supply_of(&asset.denom)?,
                    period,
                    asset.accum,
                )?;
                if !accrual.minted.is_zero() {
                    minted.push(Coin::new(accrual.minted, asset.denom.clone()));
                }
                Ok(InterestAsset {
                    accum: accrual.accum,
                    ..asset.clone()
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok((
            Self {
                last_applied_time: now,
                assets,
                ..self.clone()
            },
            minted,
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use finance::duration::Duration;
    use sdk::cosmwasm_std::{coin, Decimal, Decimal256, Timestamp, Uint128};

    use crate::error::Error;

    use super::{AssetRate, InterestAsset, InterestState};

    fn rate(denom: &str, rate: &str) -> AssetRate {
        AssetRate {
            denom: denom.into(),
            annual_rate: Decimal::from_str(rate).unwrap(),
        }
    }

    fn start() -> Timestamp {
        Timestamp::from_seconds(1_000)
    }

    fn supply(amount: u128) -> impl Fn(&str) -> Result<Uint128, Error> {
        move |_| Ok(Uint128::new(amount))
    }

    #[test]
    fn new_sorted() {
        let state =
            InterestState::new(start(), vec![rate("ugov", "0.1"), rate("ucsdt", "0.05")]).unwrap();
        assert_eq!(
            vec!["ucsdt", "ugov"],
            state
                .assets
                .iter()
                .map(|asset| asset.denom.as_str())
                .collect::<Vec<_>>()
        );
        assert!(matches!(
            InterestState::new(start(), vec![rate("ugov", "0.1"), rate("ugov", "0.2")]),
            Err(Error::InvalidParams(_))
        ));
    }

    #[test]
    fn accrue_a_year() {
        let state = InterestState::new(start(), vec![rate("ucsdt", "0.05")]).unwrap();
        let now = start() + Duration::YEAR;
        let (next, minted) = state.accrue(now, supply(1_000_000)).unwrap();
        assert_eq!(vec![coin(50_000, "ucsdt")], minted);
        assert_eq!(now, next.last_applied_time);
        assert_eq!(Decimal256::zero(), next.assets[0].accum);
    }

    #[test]
    fn before_start() {
        let state = InterestState::new(start(), vec![rate("ucsdt", "0.05")]).unwrap();
        let (next, minted) = state.accrue(start().minus_seconds(1), supply(100)).unwrap();
        assert_eq!(state, next);
        assert!(minted.is_empty());
    }

    #[test]
    fn zero_mint_left_out() {
        let state =
            InterestState::new(start(), vec![rate("ucsdt", "0.05"), rate("ugov", "0")]).unwrap();
        let (next, minted) = state
            .accrue(start() + Duration::YEAR, supply(1_000))
            .unwrap();
        assert_eq!(vec![coin(50, "ucsdt")], minted);
        assert_eq!(2, next.assets.len());
    }

    #[test]
    fn rates_keep_accum() {
        let state = InterestState::new(start(), vec![rate("ucsdt", "0.01")]).unwrap();
        let (state, minted) = state
            .accrue(start() + Duration::from_secs(1), supply(100))
            .unwrap();
        assert!(minted.is_empty());
        let accum = state.assets[0].accum;
        assert!(!accum.is_zero());

        let state = state
            .with_rates(vec![rate("ucsdt", "0.02"), rate("ugov", "0.1")])
            .unwrap();
        assert_eq!(
            vec![
                InterestAsset {
                    denom: "ucsdt".into(),
                    annual_rate: Decimal::percent(2),
                    accum,
                },
                InterestAsset {
                    denom: "ugov".into(),
                    annual_rate: Decimal::percent(10),
                    accum: Decimal256::zero(),
                },
            ],
            state.assets
        );
    }
}
