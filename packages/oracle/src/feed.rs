use serde::{Deserialize, Serialize};

use sdk::{
    cosmwasm_std::{Decimal, Storage, Timestamp},
    cw_storage_plus::Map,
    schemars::{self, JsonSchema},
};

use crate::{
    error::{Error, Result},
    PriceOracle,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PostedPrice {
    pub denom: String,
    pub price: Decimal,
    pub expiry: Timestamp,
}

impl PostedPrice {
    pub fn is_current(&self, now: Timestamp) -> bool {
        now < self.expiry
    }
}

/// Prices fed by the privileged oracle path, each valid until its expiry
pub struct PriceFeeds;

impl PriceFeeds {
    const STORAGE: Map<String, PostedPrice> = Map::new("oracle_prices");

    pub fn post(storage: &mut dyn Storage, now: Timestamp, price: PostedPrice) -> Result<()> {
        if price.price.is_zero() {
            return Err(Error::ZeroPrice(price.denom));
        }
        if !price.is_current(now) {
            return Err(Error::AlreadyExpired(
                price.denom,
                price.expiry.to_string(),
                now.to_string(),
            ));
        }
        Self::STORAGE
            .save(storage, price.denom.clone(), &price)
            .map_err(Into::into)
    }

    pub fn posted(storage: &dyn Storage, denom: &str) -> Result<Option<PostedPrice>> {
        Self::STORAGE
            .may_load(storage, denom.to_owned())
            .map_err(Into::into)
    }
}

impl PriceOracle for PriceFeeds {
    fn current_price(
        &self,
        storage: &dyn Storage,
        now: Timestamp,
        denom: &str,
    ) -> Result<Option<Decimal>> {
        Self::posted(storage, denom).map(|may_price| {
            may_price
                .filter(|posted| posted.is_current(now))
                .map(|posted| posted.price)
        })
    }
}
