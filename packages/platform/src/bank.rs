use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use sdk::{
    cosmwasm_std::{Addr, Coin, Storage, Uint128},
    cw_storage_plus::Map,
    schemars::{self, JsonSchema},
};

use crate::error::{Error, Result};

const BALANCES: Map<(Addr, String), Uint128> = Map::new("bank_balances");
const SUPPLY: Map<String, Uint128> = Map::new("bank_supply");

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    Minter,
    Burner,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ModuleAccount {
    pub address: Addr,
    pub permissions: Vec<Permission>,
}

pub trait BankAccountView {
    fn balance(&self, storage: &dyn Storage, account: &Addr, denom: &str) -> Result<Uint128>;

    fn supply(&self, storage: &dyn Storage, denom: &str) -> Result<Uint128>;
}

/// Token movements between accounts
///
/// Each operation either fully succeeds or leaves the balances untouched.
/// Zero amounts are accepted and have no effect.
pub trait BankAccount
where
    Self: BankAccountView,
{
    fn send(&self, storage: &mut dyn Storage, from: &Addr, to: &Addr, amount: &Coin)
        -> Result<()>;

    /// Create new tokens on a module account with the [`Permission::Minter`] permission
    fn mint(&self, storage: &mut dyn Storage, module: &Addr, amount: &Coin) -> Result<()>;

    /// Destroy tokens held by a module account with the [`Permission::Burner`] permission
    fn burn(&self, storage: &mut dyn Storage, module: &Addr, amount: &Coin) -> Result<()>;
}

/// A storage backed token ledger aware of the protocol module accounts
#[derive(Clone, Debug, Default)]
pub struct Ledger {
    modules: BTreeMap<Addr, BTreeSet<Permission>>,
}

impl Ledger {
    pub fn with_module<P>(mut self, module: Addr, permissions: P) -> Self
    where
        P: IntoIterator<Item = Permission>,
    {
        self.modules
            .entry(module)
            .or_default()
            .extend(permissions);
        self
    }

    pub fn module_accounts(&self) -> Vec<ModuleAccount> {
        self.modules
            .iter()
            .map(|(address, permissions)| ModuleAccount {
                address: address.clone(),
                permissions: permissions.iter().copied().collect(),
            })
            .collect()
    }

    /// Seed an account at genesis, the supply grows accordingly
    pub fn credit_genesis(
        &self,
        storage: &mut dyn Storage,
        account: &Addr,
        amount: &Coin,
    ) -> Result<()> {
        let supply = self.supply(storage, &amount.denom)?.checked_add(amount.amount)?;
        let balance = self
            .balance(storage, account, &amount.denom)?
            .checked_add(amount.amount)?;
        SUPPLY.save(storage, amount.denom.clone(), &supply)?;
        store_balance(storage, account, &amount.denom, balance)
    }

    fn ensure_permission(&self, module: &Addr, permission: Permission) -> Result<()> {
        self.modules
            .get(module)
            .ok_or_else(|| Error::UnknownModuleAccount(module.clone()))
            .and_then(|permissions| {
                if permissions.contains(&permission) {
                    Ok(())
                } else {
                    Err(Error::MissingPermission(module.clone(), permission))
                }
            })
    }

    fn debited(&self, storage: &dyn Storage, account: &Addr, amount: &Coin) -> Result<Uint128> {
        let balance = self.balance(storage, account, &amount.denom)?;
        balance
            .checked_sub(amount.amount)
            .map_err(|_| Error::insufficient_funds(account, amount, balance))
    }
}

impl BankAccountView for Ledger {
    fn balance(&self, storage: &dyn Storage, account: &Addr, denom: &str) -> Result<Uint128> {
        BALANCES
            .may_load(storage, (account.clone(), denom.to_owned()))
            .map(Option::unwrap_or_default)
            .map_err(Into::into)
    }

    fn supply(&self, storage: &dyn Storage, denom: &str) -> Result<Uint128> {
        SUPPLY
            .may_load(storage, denom.to_owned())
            .map(Option::unwrap_or_default)
            .map_err(Into::into)
    }
}

impl BankAccount for Ledger {
    fn send(
        &self,
        storage: &mut dyn Storage,
        from: &Addr,
        to: &Addr,
        amount: &Coin,
    ) -> Result<()> {
        if amount.amount.is_zero() || from == to {
            return self.debited(storage, from, amount).map(|_| ());
        }
        let from_balance = self.debited(storage, from, amount)?;
        let to_balance = self
            .balance(storage, to, &amount.denom)?
            .checked_add(amount.amount)?;
        store_balance(storage, from, &amount.denom, from_balance)?;
        store_balance(storage, to, &amount.denom, to_balance)
    }

    fn mint(&self, storage: &mut dyn Storage, module: &Addr, amount: &Coin) -> Result<()> {
        self.ensure_permission(module, Permission::Minter)?;
        if amount.amount.is_zero() {
            return Ok(());
        }
        let supply = self.supply(storage, &amount.denom)?.checked_add(amount.amount)?;
        let balance = self
            .balance(storage, module, &amount.denom)?
            .checked_add(amount.amount)?;
        SUPPLY.save(storage, amount.denom.clone(), &supply)?;
        store_balance(storage, module, &amount.denom, balance)
    }

    fn burn(&self, storage: &mut dyn Storage, module: &Addr, amount: &Coin) -> Result<()> {
        self.ensure_permission(module, Permission::Burner)?;
        if amount.amount.is_zero() {
            return Ok(());
        }
        let balance = self.debited(storage, module, amount)?;
        let supply = self.supply(storage, &amount.denom)?.checked_sub(amount.amount)?;
        SUPPLY.save(storage, amount.denom.clone(), &supply)?;
        store_balance(storage, module, &amount.denom, balance)
    }
}

fn store_balance(
    storage: &mut dyn Storage,
    account: &Addr,
    denom: &str,
    balance: Uint128,
) -> Result<()> {
    let key = (account.clone(), denom.to_owned());
    if balance.is_zero() {
        BALANCES.remove(storage, key);
        Ok(())
    } else {
        BALANCES.save(storage, key, &balance).map_err(Into::into)
    }
}
