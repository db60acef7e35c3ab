use auction::{Auction, AuctionKind};
use csdt::Csdt;
use liquidator::{Seizure, Settlement};
use platform::emit::{Emit, Emitter};
use sdk::cosmwasm_std::{Addr, Coin, Env, Int128};

pub(crate) fn csdt_modify(
    env: &Env,
    owner: &Addr,
    collateral_denom: &str,
    collateral_delta: Int128,
    debt_delta: Int128,
    csdt: Option<&Csdt>,
) -> Emitter {
    let emitter = Emitter::of_type("csdt-modify")
        .emit_tx_info(&env.block)
        .emit_addr("owner", owner)
        .emit("collateral-denom", collateral_denom)
        .emit_to_string_value("collateral-delta", collateral_delta)
        .emit_to_string_value("debt-delta", debt_delta);
    match csdt {
        Some(csdt) => emitter
            .emit_to_string_value("collateral", csdt.collateral)
            .emit_to_string_value("debt", csdt.debt),
        None => emitter.emit("closed", "true"),
    }
}

pub(crate) fn auction_start(env: &Env, auction: &Auction) -> Emitter {
    let emitter = emit_auction(Emitter::of_type("auction-start").emit_tx_info(&env.block), auction)
        .emit_addr("initiator", &auction.initiator)
        .emit_timestamp("max-end-time", &auction.max_end_time);
    match &auction.kind {
        AuctionKind::ForwardReverse {
            max_bid,
            beneficiary,
        } => emitter
            .emit_coin("max-bid", max_bid)
            .emit_addr("beneficiary", beneficiary),
        AuctionKind::Forward | AuctionKind::Reverse => emitter,
    }
}

pub(crate) fn auction_bid(env: &Env, auction: &Auction) -> Emitter {
    emit_auction(Emitter::of_type("auction-bid").emit_tx_info(&env.block), auction)
}

pub(crate) fn auction_close(env: &Env, auction: &Auction) -> Emitter {
    let winner = auction.bidder.as_ref().unwrap_or(&auction.initiator);
    emit_auction(Emitter::of_type("auction-close").emit_tx_info(&env.block), auction)
        .emit_addr("winner", winner)
}

pub(crate) fn liquidation_seize(env: &Env, seizure: &Seizure) -> Emitter {
    Emitter::of_type("liquidation-seize")
        .emit_tx_info(&env.block)
        .emit_addr("owner", &seizure.csdt.owner)
        .emit_coin("collateral", &seizure.collateral)
        .emit_to_string_value("debt", seizure.debt)
        .emit_to_string_value("penalty", seizure.liquidation_penalty)
        .emit_to_string_value("auction-id", seizure.auction.id)
}

pub(crate) fn liquidation_settle(env: &Env, settlement: &Settlement) -> Emitter {
    Emitter::of_type("liquidation-settle")
        .emit_tx_info(&env.block)
        .emit_to_string_value("settled", settlement.settled)
        .emit_to_string_value("burnt-gov", settlement.burnt_gov)
}

pub(crate) fn interest_mint(env: &Env, minted: &[Coin]) -> Emitter {
    minted.iter().fold(
        Emitter::of_type("interest-mint").emit_tx_info(&env.block),
        |emitter, coin| emitter.emit_to_string_value(coin.denom.as_str(), coin.amount),
    )
}

fn emit_auction(emitter: Emitter, auction: &Auction) -> Emitter {
    let emitter = emitter
        .emit_to_string_value("id", auction.id)
        .emit("kind", kind(&auction.kind))
        .emit_coin("lot", &auction.lot)
        .emit_coin("bid", &auction.bid)
        .emit_timestamp("end-time", &auction.end_time);
    match &auction.bidder {
        Some(bidder) => emitter.emit_addr("bidder", bidder),
        None => emitter,
    }
}

fn kind(kind: &AuctionKind) -> &'static str {
    match kind {
        AuctionKind::Forward => "forward",
        AuctionKind::Reverse => "reverse",
        AuctionKind::ForwardReverse { .. } => "forward_reverse",
    }
}
