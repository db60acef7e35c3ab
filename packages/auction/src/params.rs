use serde::{Deserialize, Serialize};

use finance::duration::Duration;
use sdk::{
    cosmwasm_std::{Decimal, Storage},
    cw_storage_plus::Item,
    schemars::{self, JsonSchema},
};

use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Params {
    /// How long an auction stays open after each bid
    pub bid_duration: Duration,
    /// The hard limit on an auction lifetime counted from its start
    pub max_auction_duration: Duration,
    /// The minimum relative raise of a forward bid
    pub min_bid_increment: Decimal,
    /// The minimum relative cut of a reverse lot
    pub min_lot_decrement: Decimal,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            bid_duration: Duration::from_hours(3),
            max_auction_duration: Duration::from_days(2),
            min_bid_increment: Decimal::zero(),
            min_lot_decrement: Decimal::zero(),
        }
    }
}

impl Params {
    const STORAGE: Item<Params> = Item::new("auction_params");

    pub fn load(storage: &dyn Storage) -> Result<Self> {
        Self::STORAGE.load(storage).map_err(Into::into)
    }

    pub fn store(&self, storage: &mut dyn Storage) -> Result<()> {
        self.validate()
            .and_then(|()| Self::STORAGE.save(storage, self).map_err(Into::into))
    }

    pub fn validate(&self) -> Result<()> {
        if self.bid_duration.is_zero() {
            Err(Error::InvalidParams("zero bid duration".into()))
        } else if self.max_auction_duration > Duration::YEAR {
            Err(Error::InvalidParams(
                "the maximum auction duration exceeds a year".into(),
            ))
        } else if self.bid_duration > self.max_auction_duration {
            Err(Error::InvalidParams(
                "the bid duration exceeds the maximum auction duration".into(),
            ))
        } else if self.min_lot_decrement >= Decimal::one() {
            Err(Error::InvalidParams(
                "the minimum lot decrement should be below one".into(),
            ))
        } else {
            Ok(())
        }
    }
}
