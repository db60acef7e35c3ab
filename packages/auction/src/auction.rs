use serde::{Deserialize, Serialize};

use sdk::{
    cosmwasm_std::{Addr, Coin, Order, Storage, Timestamp},
    cw_storage_plus::{Bound, Item, Map},
    schemars::{self, JsonSchema},
};

use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuctionKind {
    /// Sells a fixed lot for an increasing bid
    Forward,
    /// Buys with a fixed bid for a decreasing lot
    Reverse,
    /// Forward until the bid reaches `max_bid`, then reverse with the lot
    /// reductions going to `beneficiary`
    ForwardReverse { max_bid: Coin, beneficiary: Addr },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Auction {
    pub id: u64,
    pub kind: AuctionKind,
    pub initiator: Addr,
    pub lot: Coin,
    pub bid: Coin,
    pub bidder: Option<Addr>,
    pub end_time: Timestamp,
    pub max_end_time: Timestamp,
    pub closed: bool,
}

const AUCTIONS: Map<u64, Auction> = Map::new("auction_auctions");
const QUEUE: Map<(u64, u64), ()> = Map::new("auction_queue");
const NEXT_ID: Item<u64> = Item::new("auction_next_id");

impl Auction {
    pub fn load(storage: &dyn Storage, id: u64) -> Result<Self> {
        AUCTIONS
            .may_load(storage, id)?
            .ok_or(Error::AuctionNotFound(id))
    }

    /// The open auctions in order of their end time
    pub fn active(storage: &dyn Storage) -> Result<Vec<Self>> {
        QUEUE
            .keys(storage, None, None, Order::Ascending)
            .map(|key| key.map_err(Error::from).and_then(|(_, id)| Self::load(storage, id)))
            .collect()
    }

    /// The ids of the open auctions whose end time is not after `now`
    pub(crate) fn expired(storage: &dyn Storage, now: Timestamp) -> Result<Vec<u64>> {
        QUEUE
            .keys(
                storage,
                None,
                Some(Bound::inclusive((now.nanos(), u64::MAX))),
                Order::Ascending,
            )
            .map(|key| key.map(|(_, id)| id).map_err(Into::into))
            .collect()
    }

    pub(crate) fn next_id(storage: &mut dyn Storage) -> Result<u64> {
        let id = NEXT_ID.may_load(storage)?.unwrap_or_default();
        NEXT_ID.save(storage, &(id + 1))?;
        Ok(id)
    }

    pub fn is_over(&self, now: Timestamp) -> bool {
        self.closed || now >= self.end_time
    }

    pub(crate) fn store_new(&self, storage: &mut dyn Storage) -> Result<()> {
        AUCTIONS.save(storage, self.id, self)?;
        QUEUE
            .save(storage, (self.end_time.nanos(), self.id), &())
            .map_err(Into::into)
    }

    /// Persist a changed auction moving its queue entry from `prev_end_time`
    pub(crate) fn store_update(
        &self,
        storage: &mut dyn Storage,
        prev_end_time: Timestamp,
    ) -> Result<()> {
        QUEUE.remove(storage, (prev_end_time.nanos(), self.id));
        if !self.closed {
            QUEUE.save(storage, (self.end_time.nanos(), self.id), &())?;
        }
        AUCTIONS.save(storage, self.id, self).map_err(Into::into)
    }
}
