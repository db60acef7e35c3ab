use serde::{Deserialize, Serialize};

use finance::duration::Duration;
use sdk::{
    cosmwasm_std::Storage,
    cw_storage_plus::Item,
    schemars::{self, JsonSchema},
};

use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Params {
    /// No interest is minted before this much time has passed since the last minting
    pub minimum_minting_period: Duration,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            minimum_minting_period: Duration::from_secs(10),
        }
    }
}

impl Params {
    const STORAGE: Item<Params> = Item::new("interest_params");

    pub fn load(storage: &dyn Storage) -> Result<Self> {
        Self::STORAGE.load(storage).map_err(Into::into)
    }

    pub fn store(&self, storage: &mut dyn Storage) -> Result<()> {
        Self::STORAGE.save(storage, self).map_err(Into::into)
    }
}
