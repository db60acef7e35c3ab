use finance::collateral;
use oracle_platform::PriceOracle;
use platform::bank::BankAccount;
use sdk::cosmwasm_std::{coin, Addr, Coin, Decimal, Storage, Timestamp, Uint128};

use auction::{Auction, AuctionEngine};
use csdt::{error::Error as CsdtError, Csdt, CsdtLedger, GlobalDebt};

use crate::{
    debt_auctions::DebtAuctions,
    error::{Error, Result},
    params::Params,
    seized::SeizedDebt,
};

/// The module accounts the liquidation works with
pub struct Modules {
    pub csdt: Addr,
    pub auction: Addr,
    pub liquidator: Addr,
}

/// The outcome of seizing an under-collateralized position
#[derive(Debug, PartialEq)]
pub struct Seizure {
    pub csdt: Csdt,
    pub collateral: Coin,
    pub debt: Uint128,
    pub liquidation_penalty: Decimal,
    pub auction: Auction,
}

/// What the liquidation end block did
#[derive(Debug, Default, PartialEq)]
pub struct Settlement {
    /// Stable tokens burnt against the seized debt
    pub settled: Uint128,
    /// Governance tokens burnt
    pub burnt_gov: Uint128,
    pub debt_auction: Option<Auction>,
    pub surplus_auction: Option<Auction>,
}

pub struct Liquidator<'a, Bank, Oracle> {
    bank: &'a Bank,
    oracle: &'a Oracle,
    modules: &'a Modules,
}

impl<'a, Bank, Oracle> Liquidator<'a, Bank, Oracle>
where
    Bank: BankAccount,
    Oracle: PriceOracle,
{
    pub fn new(bank: &'a Bank, oracle: &'a Oracle, modules: &'a Modules) -> Self {
        Self {
            bank,
            oracle,
            modules,
        }
    }

    /// Seize a slice of an under-collateralized position and put its collateral on auction
    ///
    /// At most the collateral auction size is seized along with a proportional
    /// part of the debt rounded down. The collateral is sold for stable tokens
    /// starting from a zero bid.
    pub fn seize_and_start_collateral_auction(
        &self,
        storage: &mut dyn Storage,
        now: Timestamp,
        owner: &Addr,
        denom: &str,
    ) -> Result<Seizure> {
        let csdt_params = csdt::Params::load(storage)?;
        let collateral_params = csdt_params
            .collateral(denom)
            .ok_or_else(|| CsdtError::InvalidDenom(denom.to_owned()))?;
        let position = Csdt::load(storage, owner, denom)?;
        let price = self
            .oracle
            .current_price(storage, now, denom)?
            .ok_or_else(|| CsdtError::OracleStale(denom.to_owned()))?;
        if !collateral::is_below_ratio(
            position.collateral,
            price,
            position.debt,
            collateral_params.liquidation_ratio,
        ) {
            return Err(Error::NotUndercollateralized);
        }

        let auction_size = Params::load(storage)?.auction_size(denom)?;
        let collateral_seized = auction_size.min(position.collateral);
        let debt_seized =
            collateral::proportion(position.debt, collateral_seized, position.collateral)?;

        let csdt = self.partial_seize(storage, owner, denom, collateral_seized, debt_seized)?;
        let collateral = coin(collateral_seized.u128(), denom);
        let auction = self.auctions().start_forward(
            storage,
            now,
            &self.modules.liquidator,
            collateral.clone(),
            coin(0, csdt_params.stable_denom.clone()),
        )?;
        Ok(Seizure {
            csdt,
            collateral,
            debt: debt_seized,
            liquidation_penalty: collateral_params.liquidation_penalty,
            auction,
        })
    }

    /// Move `collateral` and `debt` of a position to the liquidator
    pub fn partial_seize(
        &self,
        storage: &mut dyn Storage,
        owner: &Addr,
        denom: &str,
        collateral: Uint128,
        debt: Uint128,
    ) -> Result<Csdt> {
        let seized = SeizedDebt::load(storage)?.seize(debt)?;
        let csdt = self.csdts().partial_seize(
            storage,
            owner,
            denom,
            collateral,
            debt,
            &self.modules.liquidator,
        )?;
        seized.store(storage)?;
        Ok(csdt)
    }

    /// Mint governance tokens and auction them for stable tokens to cover seized debt
    pub fn start_debt_auction(&self, storage: &mut dyn Storage, now: Timestamp) -> Result<Auction> {
        let params = Params::load(storage)?;
        let seized = SeizedDebt::load(storage)?;
        let needed = params.debt_auction_trigger();
        if seized.available() < needed {
            return Err(Error::InsufficientDebt {
                available: seized.available().to_string(),
                needed: needed.to_string(),
            });
        }
        self.debt_auction(storage, now, &params, seized)
    }

    /// Sell surplus stable tokens for governance tokens
    pub fn start_surplus_auction(
        &self,
        storage: &mut dyn Storage,
        now: Timestamp,
    ) -> Result<Auction> {
        let params = Params::load(storage)?;
        let surplus = self.surplus(storage)?;
        let needed = params.surplus_auction_trigger();
        if surplus < needed {
            return Err(Error::InsufficientSurplus {
                available: surplus.to_string(),
                needed: needed.to_string(),
            });
        }
        self.surplus_auction(storage, now, &params)
    }

    /// Settle seized debt with the stable tokens raised, burn the governance
    /// tokens received, then start debt and surplus auctions when due
    ///
    /// Debt auctions paid in or closed since the last run no longer cover
    /// their part of the seized debt.
    pub fn end_block(&self, storage: &mut dyn Storage, now: Timestamp) -> Result<Settlement> {
        let params = Params::load(storage)?;
        let stable_denom = csdt::Params::load(storage)?.stable_denom;
        let pool = &self.modules.liquidator;

        let seized = SeizedDebt::load(storage)?.release(DebtAuctions::release_done(storage)?);
        let settled = seized
            .total
            .min(self.bank.balance(storage, pool, &stable_denom)?);
        let seized = if settled.is_zero() {
            seized
        } else {
            self.bank
                .burn(storage, pool, &coin(settled.u128(), stable_denom))?;
            GlobalDebt::reduce(storage, settled)?;
            seized.settle(settled)?
        };
        seized.store(storage)?;

        let burnt_gov = self.bank.balance(storage, pool, &params.gov_denom)?;
        if !burnt_gov.is_zero() {
            self.bank.burn(
                storage,
                pool,
                &coin(burnt_gov.u128(), params.gov_denom.clone()),
            )?;
        }

        let debt_auction = if seized.available() >= params.debt_auction_trigger() {
            Some(self.debt_auction(storage, now, &params, seized)?)
        } else {
            None
        };
        let surplus_auction = if self.surplus(storage)? >= params.surplus_auction_trigger() {
            Some(self.surplus_auction(storage, now, &params)?)
        } else {
            None
        };

        Ok(Settlement {
            settled,
            burnt_gov,
            debt_auction,
            surplus_auction,
        })
    }

    /// The stable tokens held beyond the whole unsettled seized debt
    fn surplus(&self, storage: &dyn Storage) -> Result<Uint128> {
        let stable_denom = csdt::Params::load(storage)?.stable_denom;
        let balance = self
            .bank
            .balance(storage, &self.modules.liquidator, &stable_denom)?;
        Ok(balance.saturating_sub(SeizedDebt::load(storage)?.total))
    }

    fn debt_auction(
        &self,
        storage: &mut dyn Storage,
        now: Timestamp,
        params: &Params,
        seized: SeizedDebt,
    ) -> Result<Auction> {
        let stable_denom = csdt::Params::load(storage)?.stable_denom;
        let lot = coin(params.debt_auction_lot.u128(), params.gov_denom.clone());
        let seized = seized.send_to_auction(params.debt_auction_size)?;

        self.bank.mint(storage, &self.modules.liquidator, &lot)?;
        let auction = self.auctions().start_reverse(
            storage,
            now,
            &self.modules.liquidator,
            coin(params.debt_auction_size.u128(), stable_denom),
            lot,
        )?;
        DebtAuctions::track(storage, &auction)?;
        seized.store(storage)?;
        Ok(auction)
    }

    fn surplus_auction(
        &self,
        storage: &mut dyn Storage,
        now: Timestamp,
        params: &Params,
    ) -> Result<Auction> {
        let stable_denom = csdt::Params::load(storage)?.stable_denom;
        self.auctions()
            .start_forward(
                storage,
                now,
                &self.modules.liquidator,
                coin(params.surplus_auction_size.u128(), stable_denom),
                coin(0, params.gov_denom.clone()),
            )
            .map_err(Into::into)
    }

    fn csdts(&self) -> CsdtLedger<'_, Bank, Oracle> {
        CsdtLedger::new(self.bank, self.oracle, &self.modules.csdt)
    }

    fn auctions(&self) -> AuctionEngine<'_, Bank> {
        AuctionEngine::new(self.bank, &self.modules.auction)
    }
}
