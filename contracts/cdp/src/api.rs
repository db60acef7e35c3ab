use serde::{Deserialize, Serialize};

use interest::AssetRate;
use sdk::{
    cosmwasm_std::{Addr, Coin, Decimal, Int128, Timestamp, Uint128},
    schemars::{self, JsonSchema},
};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
pub struct InstantiateMsg {
    pub csdt: csdt::Params,
    pub auction: auction::Params,
    pub liquidator: liquidator::Params,
    pub interest: interest::Params,
    pub interest_assets: Vec<AssetRate>,
    /// The time the interest accrual starts from, the block time if absent
    pub interest_start: Option<Timestamp>,
    pub balances: Vec<GenesisBalance>,
}

/// Tokens an account holds at genesis
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
pub struct GenesisBalance {
    pub address: Addr,
    pub coins: Vec<Coin>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
pub enum ExecuteMsg {
    /// Deposit or withdraw collateral and borrow or repay stable tokens
    ///
    /// A positive delta increases, a negative one decreases.
    CreateOrModifyCsdt {
        collateral_denom: String,
        collateral_delta: Int128,
        debt_delta: Int128,
    },
    PlaceBid {
        auction_id: u64,
        bid: Coin,
        lot: Coin,
    },
    SeizeAndStartCollateralAuction {
        owner: Addr,
        collateral_denom: String,
    },
    StartDebtAuction {},
    StartSurplusAuction {},
    /// Settle an auction past its end time
    CloseAuction {
        auction_id: u64,
    },
}

/// Messages of the chain and the governance
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
pub enum SudoMsg {
    EndBlock {},
    StartForwardAuction {
        seller: Addr,
        lot: Coin,
        initial_bid: Coin,
    },
    StartReverseAuction {
        buyer: Addr,
        bid: Coin,
        initial_lot: Coin,
    },
    StartForwardReverseAuction {
        seller: Addr,
        lot: Coin,
        max_bid: Coin,
        beneficiary: Addr,
    },
    UpdateCsdtParams {
        params: csdt::Params,
    },
    UpdateAuctionParams {
        params: auction::Params,
    },
    UpdateLiquidatorParams {
        params: liquidator::Params,
    },
    UpdateInterestParams {
        params: interest::Params,
    },
    UpdateInterestAssets {
        assets: Vec<AssetRate>,
    },
    SetPrice {
        denom: String,
        price: Decimal,
        expiry: Timestamp,
    },
    SetGlobalDebt {
        amount: Uint128,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
pub enum QueryMsg {
    /// Return [`Option<csdt::Csdt>`]
    Csdt {
        owner: Addr,
        collateral_denom: String,
    },
    /// Return [`Vec<csdt::Csdt>`]
    Csdts {
        collateral_denom: Option<String>,
        under_collateralized_at: Option<Decimal>,
    },
    /// Return [`auction::Auction`]
    Auction { auction_id: u64 },
    /// Return [`Vec<auction::Auction>`] in order of their end time
    ActiveAuctions {},
    /// Return [`ParamsResponse`]
    Params {},
    /// Return [`Uint128`]
    GlobalDebt {},
    /// Return [`csdt::CollateralState`]
    CollateralState { denom: String },
    /// Return [`liquidator::SeizedDebt`]
    SeizedDebt {},
    /// Return [`interest::InterestState`]
    InterestState {},
    /// Return [`Vec<Coin>`]
    MintedInterest {},
    /// Return [`Coin`]
    Balance { address: Addr, denom: String },
    /// Return [`Coin`]
    Supply { denom: String },
    /// Return [`Vec<platform::bank::ModuleAccount>`]
    ModuleAccounts {},
    /// Return [`Option<oracle_platform::PostedPrice>`]
    Price { denom: String },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
pub struct ParamsResponse {
    pub csdt: csdt::Params,
    pub auction: auction::Params,
    pub liquidator: liquidator::Params,
    pub interest: interest::Params,
}
