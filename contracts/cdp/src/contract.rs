use auction::Auction;
use csdt::{CollateralState, Csdt, CsdtFilter, GlobalDebt};
use interest::{InterestState, MintedTally};
use liquidator::SeizedDebt;
use oracle_platform::{PostedPrice, PriceFeeds};
use platform::{bank::BankAccountView, error as platform_error};
use sdk::{
    cosmwasm_ext::Response as CwResponse,
    cosmwasm_std::{
        self, entry_point, to_json_binary, Addr, Binary, Coin, Deps, DepsMut, Env, MessageInfo,
        Storage,
    },
};

use crate::{
    api::{ExecuteMsg, GenesisBalance, InstantiateMsg, ParamsResponse, QueryMsg, SudoMsg},
    error::{Error, Result},
    event,
    state::Protocol,
};

#[entry_point]
pub fn instantiate(
    deps: DepsMut<'_>,
    env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<CwResponse> {
    genesis(deps.storage, deps.api, &env, msg)
        .map(|()| CwResponse::default())
        .inspect_err(platform_error::log(deps.api))
}

#[entry_point]
pub fn execute(
    deps: DepsMut<'_>,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<CwResponse> {
    if info.funds.is_empty() {
        try_execute(deps.storage, deps.api, &env, info.sender, msg)
    } else {
        Err(Error::NonPayable)
    }
    .inspect_err(platform_error::log(deps.api))
}

#[entry_point]
pub fn sudo(deps: DepsMut<'_>, env: Env, msg: SudoMsg) -> Result<CwResponse> {
    try_sudo(deps.storage, deps.api, &env, msg).inspect_err(platform_error::log(deps.api))
}

#[entry_point]
pub fn query(deps: Deps<'_>, env: Env, msg: QueryMsg) -> Result<Binary> {
    try_query(deps, &env, msg).inspect_err(platform_error::log(deps.api))
}

fn genesis(
    storage: &mut dyn Storage,
    api: &dyn cosmwasm_std::Api,
    env: &Env,
    msg: InstantiateMsg,
) -> Result<()> {
    msg.csdt.store(storage)?;
    msg.auction.store(storage)?;
    msg.liquidator.store(storage)?;
    msg.interest.store(storage)?;
    InterestState::new(
        msg.interest_start.unwrap_or(env.block.time),
        msg.interest_assets,
    )?
    .store(storage)?;
    GlobalDebt::store(storage, Default::default())?;
    SeizedDebt::default().store(storage)?;

    let protocol = Protocol::new();
    msg.balances
        .into_iter()
        .try_for_each(|GenesisBalance { address, coins }| {
            let account = api.addr_validate(address.as_str())?;
            coins.iter().try_for_each(|coin| {
                protocol
                    .bank()
                    .credit_genesis(storage, &account, coin)
                    .map_err(Error::from)
            })
        })
}

fn try_execute(
    storage: &mut dyn Storage,
    api: &dyn cosmwasm_std::Api,
    env: &Env,
    sender: Addr,
    msg: ExecuteMsg,
) -> Result<CwResponse> {
    let protocol = Protocol::new();
    let now = env.block.time;
    match msg {
        ExecuteMsg::CreateOrModifyCsdt {
            collateral_denom,
            collateral_delta,
            debt_delta,
        } => protocol
            .csdts()
            .modify(
                storage,
                now,
                &sender,
                &collateral_denom,
                collateral_delta,
                debt_delta,
            )
            .map(|csdt| {
                CwResponse::default().add_event(event::csdt_modify(
                    env,
                    &sender,
                    &collateral_denom,
                    collateral_delta,
                    debt_delta,
                    csdt.as_ref(),
                ))
            })
            .map_err(Into::into),
        ExecuteMsg::PlaceBid {
            auction_id,
            bid,
            lot,
        } => protocol
            .auctions()
            .place_bid(storage, now, auction_id, &sender, bid, lot)
            .map(|auction| CwResponse::default().add_event(event::auction_bid(env, &auction)))
            .map_err(Into::into),
        ExecuteMsg::SeizeAndStartCollateralAuction {
            owner,
            collateral_denom,
        } => {
            let owner = api.addr_validate(owner.as_str())?;
            protocol
                .liquidator()
                .seize_and_start_collateral_auction(storage, now, &owner, &collateral_denom)
                .map(|seizure| {
                    CwResponse::default()
                        .add_event(event::liquidation_seize(env, &seizure))
                        .add_event(event::auction_start(env, &seizure.auction))
                })
                .map_err(Into::into)
        }
        ExecuteMsg::StartDebtAuction {} => protocol
            .liquidator()
            .start_debt_auction(storage, now)
            .map(|auction| started(env, &auction))
            .map_err(Into::into),
        ExecuteMsg::StartSurplusAuction {} => protocol
            .liquidator()
            .start_surplus_auction(storage, now)
            .map(|auction| started(env, &auction))
            .map_err(Into::into),
        ExecuteMsg::CloseAuction { auction_id } => protocol
            .auctions()
            .close_expired(storage, now, auction_id)
            .map(|auction| CwResponse::default().add_event(event::auction_close(env, &auction)))
            .map_err(Into::into),
    }
}

fn try_sudo(
    storage: &mut dyn Storage,
    api: &dyn cosmwasm_std::Api,
    env: &Env,
    msg: SudoMsg,
) -> Result<CwResponse> {
    let protocol = Protocol::new();
    let now = env.block.time;
    match msg {
        SudoMsg::EndBlock {} => end_block(storage, api, env, &protocol),
        SudoMsg::StartForwardAuction {
            seller,
            lot,
            initial_bid,
        } => {
            let seller = api.addr_validate(seller.as_str())?;
            protocol
                .auctions()
                .start_forward(storage, now, &seller, lot, initial_bid)
                .map(|auction| started(env, &auction))
                .map_err(Into::into)
        }
        SudoMsg::StartReverseAuction {
            buyer,
            bid,
            initial_lot,
        } => {
            let buyer = api.addr_validate(buyer.as_str())?;
            protocol
                .auctions()
                .start_reverse(storage, now, &buyer, bid, initial_lot)
                .map(|auction| started(env, &auction))
                .map_err(Into::into)
        }
        SudoMsg::StartForwardReverseAuction {
            seller,
            lot,
            max_bid,
            beneficiary,
        } => {
            let seller = api.addr_validate(seller.as_str())?;
            let beneficiary = api.addr_validate(beneficiary.as_str())?;
            protocol
                .auctions()
                .start_forward_reverse(storage, now, &seller, lot, max_bid, &beneficiary)
                .map(|auction| started(env, &auction))
                .map_err(Into::into)
        }
        SudoMsg::UpdateCsdtParams { params } => params
            .store(storage)
            .map(|()| CwResponse::default())
            .map_err(Into::into),
        SudoMsg::UpdateAuctionParams { params } => params
            .store(storage)
            .map(|()| CwResponse::default())
            .map_err(Into::into),
        SudoMsg::UpdateLiquidatorParams { params } => params
            .store(storage)
            .map(|()| CwResponse::default())
            .map_err(Into::into),
        SudoMsg::UpdateInterestParams { params } => params
            .store(storage)
            .map(|()| CwResponse::default())
            .map_err(Into::into),
        SudoMsg::UpdateInterestAssets { assets } => InterestState::update_assets(storage, assets)
            .map(|_| CwResponse::default())
            .map_err(Into::into),
        SudoMsg::SetPrice {
            denom,
            price,
            expiry,
        } => PriceFeeds::post(
            storage,
            now,
            PostedPrice {
                denom,
                price,
                expiry,
            },
        )
        .map(|()| CwResponse::default())
        .map_err(Into::into),
        SudoMsg::SetGlobalDebt { amount } => GlobalDebt::store(storage, amount)
            .map(|()| CwResponse::default())
            .map_err(Into::into),
    }
}

/// Run the engines in their fixed order: liquidation, auctions, interest
fn end_block(
    storage: &mut dyn Storage,
    api: &dyn cosmwasm_std::Api,
    env: &Env,
    protocol: &Protocol,
) -> Result<CwResponse> {
    let now = env.block.time;

    let settlement = protocol.liquidator().end_block(storage, now)?;
    let closed = protocol.auctions().end_block(storage, now)?;
    let minted = protocol.interest().end_block(storage, &env.block)?;

    let mut response =
        CwResponse::default().add_event(event::liquidation_settle(env, &settlement));
    response = [&settlement.debt_auction, &settlement.surplus_auction]
        .into_iter()
        .flatten()
        .fold(response, |response, auction| {
            response.add_event(event::auction_start(env, auction))
        });
    response = closed.iter().fold(response, |response, auction| {
        response.add_event(event::auction_close(env, auction))
    });
    if let Some(minted) = minted {
        api.debug(&format!("Minted interest {:?}", minted));
        response = response.add_event(event::interest_mint(env, &minted));
    }
    Ok(response)
}

fn try_query(deps: Deps<'_>, env: &Env, msg: QueryMsg) -> Result<Binary> {
    let storage = deps.storage;
    match msg {
        QueryMsg::Csdt {
            owner,
            collateral_denom,
        } => {
            let owner = deps.api.addr_validate(owner.as_str())?;
            to_json_binary(&Csdt::may_load(storage, &owner, &collateral_denom)?)
        }
        QueryMsg::Csdts {
            collateral_denom,
            under_collateralized_at,
        } => to_json_binary(&Csdt::list(
            storage,
            &CsdtFilter {
                collateral_denom,
                under_collateralized_at,
            },
        )?),
        QueryMsg::Auction { auction_id } => to_json_binary(&Auction::load(storage, auction_id)?),
        QueryMsg::ActiveAuctions {} => to_json_binary(&Auction::active(storage)?),
        QueryMsg::Params {} => to_json_binary(&ParamsResponse {
            csdt: csdt::Params::load(storage)?,
            auction: auction::Params::load(storage)?,
            liquidator: liquidator::Params::load(storage)?,
            interest: interest::Params::load(storage)?,
        }),
        QueryMsg::GlobalDebt {} => to_json_binary(&GlobalDebt::load(storage)?),
        QueryMsg::CollateralState { denom } => {
            to_json_binary(&CollateralState::load(storage, &denom)?)
        }
        QueryMsg::SeizedDebt {} => to_json_binary(&SeizedDebt::load(storage)?),
        QueryMsg::InterestState {} => to_json_binary(&InterestState::load(storage)?),
        QueryMsg::MintedInterest {} => to_json_binary(&MintedTally::load(storage)?),
        QueryMsg::Balance { address, denom } => {
            // module accounts are not bech32 addresses
            let amount = Protocol::new().bank().balance(storage, &address, &denom)?;
            to_json_binary(&Coin::new(amount, denom))
        }
        QueryMsg::Supply { denom } => {
            let amount = Protocol::new().bank().supply(storage, &denom)?;
            to_json_binary(&Coin::new(amount, denom))
        }
        QueryMsg::ModuleAccounts {} => to_json_binary(&Protocol::new().bank().module_accounts()),
        QueryMsg::Price { denom } => to_json_binary(
            &PriceFeeds::posted(storage, &denom)?.filter(|price| price.is_current(env.block.time)),
        ),
    }
    .map_err(Into::into)
}

fn started(env: &Env, auction: &Auction) -> CwResponse {
    CwResponse::default().add_event(event::auction_start(env, auction))
}
