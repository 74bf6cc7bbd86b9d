#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use etherindex::adapters::memory_fee_token::MemoryFeeToken;
use etherindex::adapters::memory_oracle::MemoryOracle;
use etherindex::adapters::oracle_router::OracleRouter;
use etherindex::domain::asset::{AccountId, AssetId, ONE, PRICE_SCALE};
use etherindex::domain::factory::FundFactory;
use etherindex::domain::fund::Fund;
use etherindex::ports::fee_token::FeeToken;
use etherindex::ports::price_oracle::PriceOracle;
use etherindex::ports::swap_router::SwapRouter;

pub const FEE: u128 = 10 * ONE;

pub fn acct(name: &str) -> AccountId {
    AccountId::new(name)
}

pub fn tok(symbol: &str) -> AssetId {
    AssetId::token(symbol)
}

pub struct Harness {
    pub oracle: Rc<MemoryOracle>,
    pub router: Rc<OracleRouter>,
    pub fee_token: Rc<MemoryFeeToken>,
    pub factory: FundFactory,
}

impl Harness {
    /// Mint and approve the creation fee so `account` can create one fund.
    pub fn fund_account(&self, account: &AccountId) {
        self.fee_token.mint(account, FEE).unwrap();
        self.fee_token.approve(account, FEE);
    }

    pub fn create_fund(
        &mut self,
        creator: &AccountId,
        name: &str,
        assets: &[&str],
    ) -> Rc<RefCell<Fund>> {
        self.fund_account(creator);
        let index = self
            .factory
            .create_fund(creator, name, "IDX", assets.iter().map(|s| tok(s)).collect())
            .unwrap();
        self.factory.fund_at(index).unwrap()
    }
}

/// Native priced at 2000 quote units plus the given token prices.
pub fn harness(prices: &[(&str, u128)], slippage_bps: u32) -> Harness {
    let oracle = Rc::new(MemoryOracle::new().with_price(AssetId::Native, 2000 * PRICE_SCALE));
    for (symbol, price) in prices {
        oracle.set_price(tok(symbol), *price);
    }
    let router = Rc::new(OracleRouter::new(
        oracle.clone() as Rc<dyn PriceOracle>,
        slippage_bps,
    ));
    let fee_token = Rc::new(MemoryFeeToken::new());
    let factory = FundFactory::new(
        oracle.clone() as Rc<dyn PriceOracle>,
        router.clone() as Rc<dyn SwapRouter>,
        fee_token.clone() as Rc<dyn FeeToken>,
        acct("treasury"),
        FEE,
    );
    Harness {
        oracle,
        router,
        fee_token,
        factory,
    }
}

/// MTA at 1000, MTB at 500: exact power-of-two ratios against native, so
/// zero-slippage round trips are lossless.
pub fn two_asset_harness() -> Harness {
    harness(
        &[("MTA", 1000 * PRICE_SCALE), ("MTB", 500 * PRICE_SCALE)],
        0,
    )
}

pub fn three_asset_harness() -> Harness {
    harness(
        &[
            ("MTA", 1000 * PRICE_SCALE),
            ("MTB", 500 * PRICE_SCALE),
            ("MTC", 250 * PRICE_SCALE),
        ],
        0,
    )
}
