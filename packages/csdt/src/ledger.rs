use finance::{collateral, delta::Change};
use oracle_platform::PriceOracle;
use platform::bank::BankAccount;
use sdk::cosmwasm_std::{coin, Addr, Int128, Storage, Timestamp, Uint128};

use crate::{
    error::{Error, Result},
    params::Params,
    position::Csdt,
    totals::{CollateralState, GlobalDebt},
};

/// Keeper of the collateralized debt positions
///
/// The collateral of all positions and the stable tokens being repaid are
/// held by the `pool` module account.
pub struct CsdtLedger<'a, Bank, Oracle> {
    bank: &'a Bank,
    oracle: &'a Oracle,
    pool: &'a Addr,
}

impl<'a, Bank, Oracle> CsdtLedger<'a, Bank, Oracle>
where
    Bank: BankAccount,
    Oracle: PriceOracle,
{
    pub fn new(bank: &'a Bank, oracle: &'a Oracle, pool: &'a Addr) -> Self {
        Self { bank, oracle, pool }
    }

    /// Create, change, or close the position of `owner` in `denom`
    ///
    /// Positive deltas deposit collateral and borrow stable tokens, negative
    /// ones withdraw collateral and repay debt. Every check is done before the
    /// first write. Returns the resulting position, `None` if it was closed.
    pub fn modify(
        &self,
        storage: &mut dyn Storage,
        now: Timestamp,
        owner: &Addr,
        denom: &str,
        collateral_delta: Int128,
        debt_delta: Int128,
    ) -> Result<Option<Csdt>> {
        let collateral_change = Change::from(collateral_delta);
        let debt_change = Change::from(debt_delta);
        if collateral_change.is_unchanged() && debt_change.is_unchanged() {
            return Err(Error::ZeroDelta);
        }

        let params = Params::load(storage)?;
        let collateral_params = params
            .collateral(denom)
            .ok_or_else(|| Error::InvalidDenom(denom.to_owned()))?;

        let current = Csdt::may_load(storage, owner, denom)?
            .unwrap_or_else(|| Csdt::empty(owner.clone(), denom.to_owned()));
        let updated = Csdt {
            collateral: changed(collateral_change, current.collateral, || {
                Error::InsufficientCollateral(collateral_params.liquidation_ratio.to_string())
            })?,
            debt: changed(debt_change, current.debt, || Error::RepayExceedsDebt)?,
            ..current.clone()
        };

        if let Change::Increase(deposit) = collateral_change {
            self.ensure_funds(storage, owner, denom, deposit)?;
        }
        if let Change::Decrease(repayment) = debt_change {
            self.ensure_funds(storage, owner, &params.stable_denom, repayment)?;
        }

        if !updated.debt.is_zero() {
            let price = self
                .oracle
                .current_price(storage, now, denom)?
                .ok_or_else(|| Error::OracleStale(denom.to_owned()))?;
            if collateral::is_below_ratio(
                updated.collateral,
                price,
                updated.debt,
                collateral_params.liquidation_ratio,
            ) {
                return Err(Error::InsufficientCollateral(
                    collateral_params.liquidation_ratio.to_string(),
                ));
            }
        }

        let state = CollateralState::load(storage, denom)?.replace(
            current.collateral,
            current.debt,
            updated.collateral,
            updated.debt,
        )?;
        let global_debt = GlobalDebt::load(storage)?
            .checked_sub(current.debt)
            .map_err(|_| Error::broken_invariant_err::<GlobalDebt>("global debt below a position"))?
            .checked_add(updated.debt)?;
        if let Change::Increase(_) = debt_change {
            if state.total_debt > collateral_params.debt_limit {
                return Err(Error::ExceedsDebtCeiling(denom.to_owned()));
            }
            if global_debt > params.global_debt_limit {
                return Err(Error::ExceedsDebtCeiling(params.stable_denom.clone()));
            }
        }
        if let Change::Increase(_) = collateral_change {
            if state.total_collateral > collateral_params.collateral_limit {
                return Err(Error::ExceedsCollateralCeiling(denom.to_owned()));
            }
        }

        self.move_collateral(storage, owner, denom, collateral_change)?;
        self.move_debt(storage, owner, &params.stable_denom, debt_change)?;
        state.store(storage)?;
        GlobalDebt::store(storage, global_debt)?;
        updated.store(storage)?;

        Ok(Some(updated).filter(|csdt| !csdt.is_empty()))
    }

    /// Take `collateral` and `debt` off a position without any safety check
    ///
    /// The collateral goes from the pool to `recipient`. The debt leaves the
    /// collateral totals but stays in the global debt until it gets settled.
    pub fn partial_seize(
        &self,
        storage: &mut dyn Storage,
        owner: &Addr,
        denom: &str,
        collateral: Uint128,
        debt: Uint128,
        recipient: &Addr,
    ) -> Result<Csdt> {
        let current = Csdt::load(storage, owner, denom)?;
        let params = Params::load(storage)?;
        let updated = Csdt {
            collateral: changed(Change::Decrease(collateral), current.collateral, || {
                Error::InsufficientCollateral(
                    params
                        .collateral(denom)
                        .map(|params| params.liquidation_ratio.to_string())
                        .unwrap_or_default(),
                )
            })?,
            debt: changed(Change::Decrease(debt), current.debt, || {
                Error::RepayExceedsDebt
            })?,
            ..current.clone()
        };
        let state = CollateralState::load(storage, denom)?.replace(
            current.collateral,
            current.debt,
            updated.collateral,
            updated.debt,
        )?;

        self.bank
            .send(storage, self.pool, recipient, &coin(collateral.u128(), denom))?;
        state.store(storage)?;
        updated.store(storage)?;
        Ok(updated)
    }

    fn ensure_funds(
        &self,
        storage: &dyn Storage,
        owner: &Addr,
        denom: &str,
        needed: Uint128,
    ) -> Result<()> {
        let available = self.bank.balance(storage, owner, denom)?;
        if available < needed {
            Err(Error::InsufficientFunds(
                platform::error::Error::insufficient_funds(
                    owner,
                    &coin(needed.u128(), denom),
                    available,
                ),
            ))
        } else {
            Ok(())
        }
    }

    fn move_collateral(
        &self,
        storage: &mut dyn Storage,
        owner: &Addr,
        denom: &str,
        change: Change,
    ) -> Result<()> {
        match change {
            Change::Increase(deposit) => {
                self.bank
                    .send(storage, owner, self.pool, &coin(deposit.u128(), denom))
            }
            Change::Decrease(withdrawal) => {
                self.bank
                    .send(storage, self.pool, owner, &coin(withdrawal.u128(), denom))
            }
            Change::Unchanged => Ok(()),
        }
        .map_err(Into::into)
    }

    fn move_debt(
        &self,
        storage: &mut dyn Storage,
        owner: &Addr,
        stable_denom: &str,
        change: Change,
    ) -> Result<()> {
        match change {
            Change::Increase(borrowed) => {
                let borrowed = coin(borrowed.u128(), stable_denom);
                self.bank
                    .mint(storage, self.pool, &borrowed)
                    .and_then(|()| self.bank.send(storage, self.pool, owner, &borrowed))
            }
            Change::Decrease(repaid) => {
                let repaid = coin(repaid.u128(), stable_denom);
                self.bank
                    .send(storage, owner, self.pool, &repaid)
                    .and_then(|()| self.bank.burn(storage, self.pool, &repaid))
            }
            Change::Unchanged => Ok(()),
        }
        .map_err(Into::into)
    }
}

fn changed<E>(change: Change, amount: Uint128, on_decrease: E) -> Result<Uint128>
where
    E: FnOnce() -> Error,
{
    match change {
        Change::Increase(by) => amount.checked_add(by).map_err(Into::into),
        Change::Decrease(_) | Change::Unchanged => change.apply(amount).ok_or_else(on_decrease),
    }
}
