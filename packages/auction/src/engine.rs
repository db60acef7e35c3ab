use finance::duration::Duration;
use platform::bank::BankAccount;
use sdk::cosmwasm_std::{coin, Addr, Coin, OverflowError, OverflowOperation, Storage, Timestamp};

use crate::{
    auction::{Auction, AuctionKind},
    bid,
    error::{Error, Result},
    params::Params,
};

/// Runs the auctions, the lots are kept in escrow by the `pool` module account
pub struct AuctionEngine<'a, Bank> {
    bank: &'a Bank,
    pool: &'a Addr,
}

impl<'a, Bank> AuctionEngine<'a, Bank>
where
    Bank: BankAccount,
{
    pub fn new(bank: &'a Bank, pool: &'a Addr) -> Self {
        Self { bank, pool }
    }

    /// Sell `lot` for an increasing bid starting at `initial_bid`
    pub fn start_forward(
        &self,
        storage: &mut dyn Storage,
        now: Timestamp,
        seller: &Addr,
        lot: Coin,
        initial_bid: Coin,
    ) -> Result<Auction> {
        self.start(storage, now, AuctionKind::Forward, seller, lot, initial_bid)
    }

    /// Pay the fixed `bid` for a lot decreasing from `initial_lot`
    pub fn start_reverse(
        &self,
        storage: &mut dyn Storage,
        now: Timestamp,
        buyer: &Addr,
        bid: Coin,
        initial_lot: Coin,
    ) -> Result<Auction> {
        self.start(storage, now, AuctionKind::Reverse, buyer, initial_lot, bid)
    }

    pub fn start_forward_reverse(
        &self,
        storage: &mut dyn Storage,
        now: Timestamp,
        seller: &Addr,
        lot: Coin,
        max_bid: Coin,
        beneficiary: &Addr,
    ) -> Result<Auction> {
        let initial_bid = coin(0, max_bid.denom.clone());
        self.start(
            storage,
            now,
            AuctionKind::ForwardReverse {
                max_bid,
                beneficiary: beneficiary.clone(),
            },
            seller,
            lot,
            initial_bid,
        )
    }

    /// Offer `bid` for `lot` on an open auction
    ///
    /// The bidder pays the whole bid, the previous bidder gets their bid back
    /// and the initiator receives the rest. A lot reduction is returned from
    /// the escrow at once.
    pub fn place_bid(
        &self,
        storage: &mut dyn Storage,
        now: Timestamp,
        id: u64,
        bidder: &Addr,
        bid: Coin,
        lot: Coin,
    ) -> Result<Auction> {
        let auction = Auction::load(storage, id)?;
        if auction.is_over(now) {
            return Err(Error::AuctionClosed(id));
        }
        let params = Params::load(storage)?;
        bid::check(&auction, &params, &bid, &lot)?;

        let available = self.bank.balance(storage, bidder, &bid.denom)?;
        if available < bid.amount {
            return Err(Error::InsufficientFunds(
                platform::error::Error::insufficient_funds(bidder, &bid, available),
            ));
        }

        let to_initiator = match &auction.bidder {
            Some(prev_bidder) => {
                self.bank
                    .send(storage, bidder, prev_bidder, &auction.bid)?;
                bid.amount.checked_sub(auction.bid.amount)?
            }
            None => bid.amount,
        };
        self.bank.send(
            storage,
            bidder,
            &auction.initiator,
            &coin(to_initiator.u128(), bid.denom.clone()),
        )?;

        let lot_returned = auction.lot.amount.checked_sub(lot.amount)?;
        if !lot_returned.is_zero() {
            let returned_to = match &auction.kind {
                AuctionKind::ForwardReverse { beneficiary, .. } => beneficiary,
                AuctionKind::Forward | AuctionKind::Reverse => &auction.initiator,
            };
            self.bank.send(
                storage,
                self.pool,
                returned_to,
                &coin(lot_returned.u128(), lot.denom.clone()),
            )?;
        }

        let prev_end_time = auction.end_time;
        let updated = Auction {
            end_time: end_time(now, params.bid_duration)?.min(auction.max_end_time),
            bidder: Some(bidder.clone()),
            bid,
            lot,
            ..auction
        };
        updated.store_update(storage, prev_end_time)?;
        Ok(updated)
    }

    /// Settle an auction whose time is up, at the request of anyone
    pub fn close_expired(
        &self,
        storage: &mut dyn Storage,
        now: Timestamp,
        id: u64,
    ) -> Result<Auction> {
        let auction = Auction::load(storage, id)?;
        if auction.closed {
            Err(Error::AuctionClosed(id))
        } else if now < auction.end_time {
            Err(Error::AuctionNotExpired(id))
        } else {
            self.close(storage, auction)
        }
    }

    /// Close all auctions expired by `now` in the order of their end time
    pub fn end_block(&self, storage: &mut dyn Storage, now: Timestamp) -> Result<Vec<Auction>> {
        let expired = Auction::expired(storage, now)?;
        expired
            .into_iter()
            .map(|id| {
                let auction = Auction::load(storage, id)?;
                self.close(storage, auction)
            })
            .collect()
    }

    /// Hand the lot over to the winner, or back to the initiator if no one bid
    fn close(&self, storage: &mut dyn Storage, auction: Auction) -> Result<Auction> {
        let winner = auction.bidder.as_ref().unwrap_or(&auction.initiator);
        self.bank.send(storage, self.pool, winner, &auction.lot)?;

        let closed = Auction {
            closed: true,
            ..auction
        };
        closed.store_update(storage, closed.end_time)?;
        Ok(closed)
    }

    fn start(
        &self,
        storage: &mut dyn Storage,
        now: Timestamp,
        kind: AuctionKind,
        initiator: &Addr,
        lot: Coin,
        bid: Coin,
    ) -> Result<Auction> {
        if lot.amount.is_zero() {
            return Err(Error::InvalidAmount);
        }
        if let AuctionKind::ForwardReverse { max_bid, .. } = &kind {
            if max_bid.amount.is_zero() {
                return Err(Error::InvalidAmount);
            }
        }
        let params = Params::load(storage)?;
        let available = self.bank.balance(storage, initiator, &lot.denom)?;
        if available < lot.amount {
            return Err(Error::InsufficientFunds(
                platform::error::Error::insufficient_funds(initiator, &lot, available),
            ));
        }
        let end_time = end_time(now, params.max_auction_duration)?;

        self.bank.send(storage, initiator, self.pool, &lot)?;
        let auction = Auction {
            id: Auction::next_id(storage)?,
            kind,
            initiator: initiator.clone(),
            lot,
            bid,
            bidder: None,
            end_time,
            max_end_time: end_time,
            closed: false,
        };
        auction.store_new(storage)?;
        Ok(auction)
    }
}

fn end_time(now: Timestamp, period: Duration) -> Result<Timestamp> {
    period
        .checked_after(now)
        .ok_or_else(|| OverflowError::new(OverflowOperation::Add).into())
}

#[cfg(test)]
mod tests {
    use finance::duration::Duration;
    use platform::bank::{BankAccountView, Ledger};
    use sdk::cosmwasm_std::{coin, testing::MockStorage, Addr, Timestamp};

    use crate::{
        auction::{Auction, AuctionKind},
        error::Error,
        params::Params,
    };

    use super::AuctionEngine;

    const T1: &str = "t1";
    const T2: &str = "t2";

    fn pool() -> Addr {
        Addr::unchecked("auction")
    }

    fn seller() -> Addr {
        Addr::unchecked("seller")
    }

    fn buyer() -> Addr {
        Addr::unchecked("buyer")
    }

    fn start() -> Timestamp {
        Timestamp::from_seconds(1_000)
    }

    fn setup(bank: &Ledger) -> MockStorage {
        let mut storage = MockStorage::new();
        Params::default().store(&mut storage).unwrap();
        [seller(), buyer(), Addr::unchecked("other")]
            .iter()
            .for_each(|account| {
                bank.credit_genesis(&mut storage, account, &coin(100, T1))
                    .unwrap();
                bank.credit_genesis(&mut storage, account, &coin(100, T2))
                    .unwrap();
            });
        storage
    }

    fn balance(bank: &Ledger, storage: &MockStorage, account: &Addr, denom: &str) -> u128 {
        bank.balance(storage, account, denom).unwrap().u128()
    }

    fn bid_time() -> Duration {
        Params::default().bid_duration
    }

    #[test]
    fn forward() {
        let bank = Ledger::default();
        let mut storage = setup(&bank);
        let pool = pool();
        let engine = AuctionEngine::new(&bank, &pool);

        let auction = engine
            .start_forward(&mut storage, start(), &seller(), coin(20, T1), coin(0, T2))
            .unwrap();
        assert_eq!(0, auction.id);
        assert_eq!(80, balance(&bank, &storage, &seller(), T1));
        assert_eq!(20, balance(&bank, &storage, &pool, T1));

        let auction = engine
            .place_bid(&mut storage, start(), 0, &buyer(), coin(10, T2), coin(20, T1))
            .unwrap();
        assert_eq!(110, balance(&bank, &storage, &seller(), T2));
        assert_eq!(90, balance(&bank, &storage, &buyer(), T2));
        assert_eq!(start() + bid_time(), auction.end_time);

        assert_eq!(
            Ok(0),
            engine
                .end_block(&mut storage, auction.end_time.minus_nanos(1))
                .map(|closed| closed.len())
        );
        let closed = engine
            .end_block(&mut storage, start() + bid_time())
            .unwrap();
        assert_eq!(1, closed.len());
        assert!(closed[0].closed);
        assert_eq!(120, balance(&bank, &storage, &buyer(), T1));
        assert_eq!(0, balance(&bank, &storage, &pool, T1));
        assert_eq!(Ok(true), Auction::load(&storage, 0).map(|auction| auction.closed));
        assert_eq!(Ok(vec![]), Auction::active(&storage));
    }

    #[test]
    fn forward_outbid() {
        let bank = Ledger::default();
        let mut storage = setup(&bank);
        let other = Addr::unchecked("other");
        let pool = pool();
        let engine = AuctionEngine::new(&bank, &pool);

        engine
            .start_forward(&mut storage, start(), &seller(), coin(20, T1), coin(0, T2))
            .unwrap();
        engine
            .place_bid(&mut storage, start(), 0, &buyer(), coin(10, T2), coin(20, T1))
            .unwrap();
        engine
            .place_bid(&mut storage, start(), 0, &other, coin(25, T2), coin(20, T1))
            .unwrap();
        assert_eq!(100, balance(&bank, &storage, &buyer(), T2));
        assert_eq!(75, balance(&bank, &storage, &other, T2));
        assert_eq!(125, balance(&bank, &storage, &seller(), T2));

        assert_eq!(
            Err(Error::BidTooLow),
            engine.place_bid(&mut storage, start(), 0, &buyer(), coin(25, T2), coin(20, T1))
        );
    }

    #[test]
    fn reverse() {
        let bank = Ledger::default();
        let mut storage = setup(&bank);
        let pool = pool();
        let engine = AuctionEngine::new(&bank, &pool);

        engine
            .start_reverse(&mut storage, start(), &buyer(), coin(20, T1), coin(99, T2))
            .unwrap();
        assert_eq!(1, balance(&bank, &storage, &buyer(), T2));

        engine
            .place_bid(&mut storage, start(), 0, &seller(), coin(20, T1), coin(10, T2))
            .unwrap();
        assert_eq!(120, balance(&bank, &storage, &buyer(), T1));
        assert_eq!(90, balance(&bank, &storage, &buyer(), T2));
        assert_eq!(80, balance(&bank, &storage, &seller(), T1));

        engine
            .close_expired(&mut storage, start() + bid_time(), 0)
            .unwrap();
        assert_eq!(110, balance(&bank, &storage, &seller(), T2));
    }

    #[test]
    fn forward_reverse() {
        let bank = Ledger::default();
        let mut storage = setup(&bank);
        let recipient = Addr::unchecked("recipient");
        let pool = pool();
        let engine = AuctionEngine::new(&bank, &pool);

        let auction = engine
            .start_forward_reverse(
                &mut storage,
                start(),
                &seller(),
                coin(20, T1),
                coin(50, T2),
                &recipient,
            )
            .unwrap();
        assert_eq!(coin(0, T2), auction.bid);

        engine
            .place_bid(&mut storage, start(), 0, &buyer(), coin(50, T2), coin(15, T1))
            .unwrap();
        assert_eq!(150, balance(&bank, &storage, &seller(), T2));
        assert_eq!(5, balance(&bank, &storage, &recipient, T1));

        engine
            .end_block(&mut storage, start() + Duration::from_days(2))
            .unwrap();
        assert_eq!(115, balance(&bank, &storage, &buyer(), T1));
        assert_eq!(0, balance(&bank, &storage, &pool, T1));
    }

    #[test]
    fn no_bids_returns_the_lot() {
        let bank = Ledger::default();
        let mut storage = setup(&bank);
        let pool = pool();
        let engine = AuctionEngine::new(&bank, &pool);

        let auction = engine
            .start_forward(&mut storage, start(), &seller(), coin(20, T1), coin(0, T2))
            .unwrap();
        assert_eq!(start() + Params::default().max_auction_duration, auction.end_time);
        assert_eq!(auction.end_time, auction.max_end_time);

        engine.end_block(&mut storage, auction.end_time).unwrap();
        assert_eq!(100, balance(&bank, &storage, &seller(), T1));
    }

    #[test]
    fn bids_extend_the_end() {
        let bank = Ledger::default();
        let mut storage = setup(&bank);
        let pool = pool();
        let engine = AuctionEngine::new(&bank, &pool);

        engine
            .start_forward(&mut storage, start(), &seller(), coin(20, T1), coin(0, T2))
            .unwrap();

        let one_hour_later = start() + Duration::from_hours(1);
        let auction = engine
            .place_bid(&mut storage, one_hour_later, 0, &buyer(), coin(1, T2), coin(20, T1))
            .unwrap();
        assert_eq!(one_hour_later + bid_time(), auction.end_time);

        let expiry = auction.end_time;
        assert_eq!(
            Err(Error::AuctionClosed(0)),
            engine.place_bid(&mut storage, expiry, 0, &buyer(), coin(2, T2), coin(20, T1))
        );

        let just_before = expiry.minus_nanos(1);
        let auction = engine
            .place_bid(&mut storage, just_before, 0, &buyer(), coin(2, T2), coin(20, T1))
            .unwrap();
        assert_eq!(just_before + bid_time(), auction.end_time);
        assert!(auction.end_time <= auction.max_end_time);
        assert_eq!(Ok(vec![auction]), Auction::active(&storage));
    }

    #[test]
    fn max_end_caps_the_extension() {
        let bank = Ledger::default();
        let mut storage = MockStorage::new();
        Params {
            bid_duration: Duration::from_hours(3),
            max_auction_duration: Duration::from_hours(4),
            ..Params::default()
        }
        .store(&mut storage)
        .unwrap();
        bank.credit_genesis(&mut storage, &seller(), &coin(20, T1))
            .unwrap();
        bank.credit_genesis(&mut storage, &buyer(), &coin(20, T2))
            .unwrap();
        let pool = pool();
        let engine = AuctionEngine::new(&bank, &pool);

        engine
            .start_forward(&mut storage, start(), &seller(), coin(20, T1), coin(0, T2))
            .unwrap();
        let auction = engine
            .place_bid(
                &mut storage,
                start() + Duration::from_hours(2),
                0,
                &buyer(),
                coin(1, T2),
                coin(20, T1),
            )
            .unwrap();
        assert_eq!(start() + Duration::from_hours(4), auction.end_time);
        assert_eq!(auction.max_end_time, auction.end_time);

        assert_eq!(
            Err(Error::AuctionClosed(0)),
            engine.place_bid(
                &mut storage,
                auction.end_time,
                0,
                &buyer(),
                coin(2, T2),
                coin(20, T1),
            )
        );
    }

    #[test]
    fn close_expired() {
        let bank = Ledger::default();
        let mut storage = setup(&bank);
        let pool = pool();
        let engine = AuctionEngine::new(&bank, &pool);

        let auction = engine
            .start_forward(&mut storage, start(), &seller(), coin(20, T1), coin(0, T2))
            .unwrap();
        assert_eq!(
            Err(Error::AuctionNotExpired(0)),
            engine.close_expired(&mut storage, start(), 0)
        );
        assert!(engine
            .close_expired(&mut storage, auction.end_time, 0)
            .unwrap()
            .closed);
        assert_eq!(
            Err(Error::AuctionClosed(0)),
            engine.close_expired(&mut storage, auction.end_time, 0)
        );
        assert_eq!(
            Err(Error::AuctionNotFound(1)),
            engine.close_expired(&mut storage, auction.end_time, 1)
        );
    }

    #[test]
    fn end_time_overflow() {
        let bank = Ledger::default();
        let mut storage = setup(&bank);
        let pool = pool();
        let engine = AuctionEngine::new(&bank, &pool);

        assert!(matches!(
            engine.start_forward(
                &mut storage,
                Timestamp::from_nanos(u64::MAX - 1),
                &seller(),
                coin(20, T1),
                coin(0, T2)
            ),
            Err(Error::Overflow(_))
        ));
        assert_eq!(100, balance(&bank, &storage, &seller(), T1));
    }

    #[test]
    fn end_block_in_end_time_order() {
        let bank = Ledger::default();
        let mut storage = setup(&bank);
        let pool = pool();
        let engine = AuctionEngine::new(&bank, &pool);

        let later = start() + Duration::from_hours(1);
        engine
            .start_forward(&mut storage, later, &seller(), coin(10, T1), coin(0, T2))
            .unwrap();
        engine
            .start_forward(&mut storage, start(), &seller(), coin(10, T1), coin(0, T2))
            .unwrap();
        assert_eq!(
            vec![1, 0],
            Auction::active(&storage)
                .unwrap()
                .iter()
                .map(|auction| auction.id)
                .collect::<Vec<_>>()
        );

        let closed = engine
            .end_block(&mut storage, later + Duration::from_days(2))
            .unwrap();
        assert_eq!(
            vec![1, 0],
            closed.iter().map(|auction| auction.id).collect::<Vec<_>>()
        );
    }

    #[test]
    fn invalid_starts_and_bids() {
        let bank = Ledger::default();
        let mut storage = setup(&bank);
        let pool = pool();
        let engine = AuctionEngine::new(&bank, &pool);

        assert_eq!(
            Err(Error::InvalidAmount),
            engine.start_forward(&mut storage, start(), &seller(), coin(0, T1), coin(0, T2))
        );
        assert!(matches!(
            engine.start_forward(&mut storage, start(), &seller(), coin(101, T1), coin(0, T2)),
            Err(Error::InsufficientFunds(_))
        ));
        assert_eq!(
            Err(Error::AuctionNotFound(0)),
            engine.place_bid(&mut storage, start(), 0, &buyer(), coin(1, T2), coin(20, T1))
        );

        engine
            .start_forward(&mut storage, start(), &seller(), coin(20, T1), coin(0, T2))
            .unwrap();
        assert!(matches!(
            engine.place_bid(&mut storage, start(), 0, &buyer(), coin(101, T2), coin(20, T1)),
            Err(Error::InsufficientFunds(_))
        ));
        assert_eq!(
            Err(Error::denom_mismatch(T2, T1)),
            engine.place_bid(&mut storage, start(), 0, &buyer(), coin(1, T1), coin(20, T1))
        );
        assert_eq!(
            Ok(AuctionKind::Forward),
            Auction::load(&storage, 0).map(|auction| auction.kind)
        );
        assert_eq!(Ok(None), Auction::load(&storage, 0).map(|auction| auction.bidder));
    }
}
