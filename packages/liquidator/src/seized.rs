use serde::{Deserialize, Serialize};

use sdk::{
    cosmwasm_std::{Storage, Uint128},
    cw_storage_plus::Item,
    schemars::{self, JsonSchema},
};

use crate::error::{Error, Result};

/// Debt taken over from liquidated positions and not yet settled
///
/// `sent_to_auction` is the part being covered by running debt auctions,
/// it never exceeds `total`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SeizedDebt {
    pub total: Uint128,
    pub sent_to_auction: Uint128,
}

impl SeizedDebt {
    const STORAGE: Item<SeizedDebt> = Item::new("liquidator_seized_debt");

    pub fn load(storage: &dyn Storage) -> Result<Self> {
        Self::STORAGE
            .may_load(storage)
            .map(Option::unwrap_or_default)
            .map_err(Into::into)
    }

    pub fn store(&self, storage: &mut dyn Storage) -> Result<()> {
        if self.sent_to_auction > self.total {
            return Err(Error::broken_invariant_err::<Self>(
                "more debt sent to auction than seized",
            ));
        }
        Self::STORAGE.save(storage, self).map_err(Into::into)
    }

    /// The debt not yet covered by a debt auction
    pub fn available(&self) -> Uint128 {
        self.total.saturating_sub(self.sent_to_auction)
    }

    pub fn seize(self, debt: Uint128) -> Result<Self> {
        Ok(Self {
            total: self.total.checked_add(debt)?,
            ..self
        })
    }

    pub fn send_to_auction(self, debt: Uint128) -> Result<Self> {
        let sent_to_auction = self.sent_to_auction.checked_add(debt)?;
        if sent_to_auction > self.total {
            Err(Error::broken_invariant_err::<Self>(
                "sending more debt to auction than seized",
            ))
        } else {
            Ok(Self {
                sent_to_auction,
                ..self
            })
        }
    }

    /// Stop counting `debt` as covered once its debt auctions are paid in or closed
    pub fn release(self, debt: Uint128) -> Self {
        Self {
            sent_to_auction: self.sent_to_auction.saturating_sub(debt),
            ..self
        }
    }

    /// Reduce the debt by `amount` of burnt stable tokens
    ///
    /// The part not sent to auction is settled first.
    pub fn settle(self, amount: Uint128) -> Result<Self> {
        let total = self.total.checked_sub(amount).map_err(|_| {
            Error::broken_invariant_err::<Self>("settling more than the seized debt")
        })?;
        Ok(Self {
            total,
            sent_to_auction: self.sent_to_auction.min(total),
        })
    }
}
