use sdk::cosmwasm_std::{Coin, Uint128};

use crate::{
    auction::{Auction, AuctionKind},
    error::{Error, Result},
    params::Params,
};

/// Check that `bid` for `lot` is an acceptable offer on `auction`
pub(crate) fn check(auction: &Auction, params: &Params, bid: &Coin, lot: &Coin) -> Result<()> {
    if bid.denom != auction.bid.denom {
        return Err(Error::denom_mismatch(&auction.bid.denom, &bid.denom));
    }
    if lot.denom != auction.lot.denom {
        return Err(Error::denom_mismatch(&auction.lot.denom, &lot.denom));
    }

    match &auction.kind {
        AuctionKind::Forward => {
            forward_lot_unchanged(auction, lot)?;
            raised_bid(auction.bid.amount, bid.amount, params, None)
        }
        AuctionKind::Reverse => {
            if bid.amount != auction.bid.amount {
                return Err(Error::InvalidBid);
            }
            cut_lot(auction.lot.amount, lot.amount, params)
        }
        AuctionKind::ForwardReverse { max_bid, .. } => {
            if bid.amount > max_bid.amount {
                Err(Error::BidAboveMax(max_bid.to_string()))
            } else if auction.bid.amount < max_bid.amount {
                raised_bid(auction.bid.amount, bid.amount, params, Some(max_bid.amount))?;
                if bid.amount == max_bid.amount {
                    if lot.amount > auction.lot.amount {
                        Err(Error::InvalidLot)
                    } else {
                        Ok(())
                    }
                } else {
                    forward_lot_unchanged(auction, lot)
                }
            } else if bid.amount != max_bid.amount {
                Err(Error::InvalidBid)
            } else {
                cut_lot(auction.lot.amount, lot.amount, params)
            }
        }
    }
}

fn forward_lot_unchanged(auction: &Auction, lot: &Coin) -> Result<()> {
    if lot.amount == auction.lot.amount {
        Ok(())
    } else {
        Err(Error::InvalidLot)
    }
}

/// The new bid should exceed the current one by the minimum increment,
/// reaching `cap` is always enough
fn raised_bid(
    current: Uint128,
    bid: Uint128,
    params: &Params,
    cap: Option<Uint128>,
) -> Result<()> {
    if bid <= current {
        return Err(Error::BidTooLow);
    }
    let required = current.checked_add(current.checked_mul_ceil(params.min_bid_increment)?)?;
    let required = cap.map_or(required, |cap| required.min(cap));
    if bid < required {
        Err(Error::BidTooLow)
    } else {
        Ok(())
    }
}

/// The new lot should be below the current one by the minimum decrement
fn cut_lot(current: Uint128, lot: Uint128, params: &Params) -> Result<()> {
    if lot >= current {
        return Err(Error::BidTooLow);
    }
    let allowed = current.checked_sub(current.checked_mul_ceil(params.min_lot_decrement)?)?;
    if lot > allowed {
        Err(Error::BidTooLow)
    } else {
        Ok(())
    }
}
