use finance::duration::Duration;
use platform::bank::BankAccount;
use sdk::cosmwasm_std::{Addr, BlockInfo, Coin, Storage};

use crate::{
    error::Result,
    minted::MintedTally,
    params::Params,
    state::InterestState,
};

/// Mints interest on the total supply of the tracked assets into the `pool` module account
pub struct InterestEngine<'a, Bank> {
    bank: &'a Bank,
    pool: &'a Addr,
}

impl<'a, Bank> InterestEngine<'a, Bank>
where
    Bank: BankAccount,
{
    pub fn new(bank: &'a Bank, pool: &'a Addr) -> Self {
        Self { bank, pool }
    }

    /// Mint the interest accrued since the last minting
    ///
    /// Nothing happens before the minimum minting period elapses or on the
    /// block right after the last minting. The state is kept as is unless
    /// some coins are minted, so the accrual resumes from the same point.
    pub fn end_block(&self, storage: &mut dyn Storage, block: &BlockInfo) -> Result<Option<Vec<Coin>>> {
        let params = Params::load(storage)?;
        let state = InterestState::load(storage)?;
        if Duration::between(state.last_applied_time, block.time) < params.minimum_minting_period
            || block.height == state.last_applied_height + 1
        {
            return Ok(None);
        }

        let view: &dyn Storage = storage;
        let (next, minted) = state.accrue(block.time, |denom| {
            self.bank.supply(view, denom).map_err(Into::into)
        })?;
        if minted.is_empty() {
            return Ok(None);
        }

        minted
            .iter()
            .try_for_each(|coin| self.bank.mint(storage, self.pool, coin))?;
        MintedTally::add(storage, &minted)?;
        InterestState {
            last_applied_height: block.height,
            ..next
        }
        .store(storage)?;
        Ok(Some(minted))
    }
}
