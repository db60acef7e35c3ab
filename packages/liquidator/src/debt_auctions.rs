use sdk::{
    cosmwasm_std::{Order, StdResult, Storage, Uint128},
    cw_storage_plus::Map,
};

use auction::Auction;

use crate::error::Result;

/// The debt auctions still covering a part of the seized debt
///
/// A debt auction stops covering its size once the bid is paid in or the
/// auction closes without bids.
pub(crate) struct DebtAuctions;

impl DebtAuctions {
    const STORAGE: Map<u64, Uint128> = Map::new("liquidator_debt_auctions");

    pub fn track(storage: &mut dyn Storage, auction: &Auction) -> Result<()> {
        Self::STORAGE
            .save(storage, auction.id, &auction.bid.amount)
            .map_err(Into::into)
    }

    /// Stop tracking the auctions paid in or closed and return the debt they covered
    pub fn release_done(storage: &mut dyn Storage) -> Result<Uint128> {
        let tracked = Self::STORAGE
            .range(storage, None, None, Order::Ascending)
            .collect::<StdResult<Vec<_>>>()?;
        tracked
            .into_iter()
            .try_fold(Uint128::zero(), |released, (id, size)| {
                let auction = Auction::load(storage, id)?;
                if auction.closed || auction.bidder.is_some() {
                    Self::STORAGE.remove(storage, id);
                    released.checked_add(size).map_err(Into::into)
                } else {
                    Ok(released)
                }
            })
    }
}
