use auction::AuctionEngine;
use csdt::CsdtLedger;
use interest::InterestEngine;
use liquidator::{Liquidator, Modules};
use oracle_platform::PriceFeeds;
use platform::bank::{Ledger, Permission};
use sdk::cosmwasm_std::Addr;

const CSDT_MODULE: &str = "csdt";
const AUCTION_MODULE: &str = "auction";
const LIQUIDATOR_MODULE: &str = "liquidator";
const INTEREST_MODULE: &str = "interest";

/// The module accounts of the protocol and the engines working on them
pub(crate) struct Protocol {
    bank: Ledger,
    oracle: PriceFeeds,
    modules: Modules,
    interest: Addr,
}

impl Protocol {
    pub fn new() -> Self {
        let modules = Modules {
            csdt: Addr::unchecked(CSDT_MODULE),
            auction: Addr::unchecked(AUCTION_MODULE),
            liquidator: Addr::unchecked(LIQUIDATOR_MODULE),
        };
        let interest = Addr::unchecked(INTEREST_MODULE);
        let bank = Ledger::default()
            .with_module(
                modules.csdt.clone(),
                [Permission::Minter, Permission::Burner],
            )
            .with_module(modules.auction.clone(), [])
            .with_module(
                modules.liquidator.clone(),
                [Permission::Minter, Permission::Burner],
            )
            .with_module(interest.clone(), [Permission::Minter]);
        Self {
            bank,
            oracle: PriceFeeds,
            modules,
            interest,
        }
    }

    pub fn bank(&self) -> &Ledger {
        &self.bank
    }

    pub fn csdts(&self) -> CsdtLedger<'_, Ledger, PriceFeeds> {
        CsdtLedger::new(&self.bank, &self.oracle, &self.modules.csdt)
    }

    pub fn auctions(&self) -> AuctionEngine<'_, Ledger> {
        AuctionEngine::new(&self.bank, &self.modules.auction)
    }

    pub fn liquidator(&self) -> Liquidator<'_, Ledger, PriceFeeds> {
        Liquidator::new(&self.bank, &self.oracle, &self.modules)
    }

    pub fn interest(&self) -> InterestEngine<'_, Ledger> {
        InterestEngine::new(&self.bank, &self.interest)
    }
}
