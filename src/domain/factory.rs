//! Fund factory and registry.
//!
//! Creation is gated on payment of a fixed fee in the fee token, transferred
//! from the creator to the treasury before the fund is instantiated. The
//! registry is append-only: sequence numbers are dense and in creation
//! order, and funds are additionally indexed by creator.

use chrono::{DateTime, Utc};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::asset::{AccountId, AssetId};
use super::error::FundError;
use super::fund::{validate_underlying, Fund};
use crate::ports::fee_token::FeeToken;
use crate::ports::price_oracle::PriceOracle;
use crate::ports::swap_router::SwapRouter;

pub struct RegistryEntry {
    pub fund: Rc<RefCell<Fund>>,
    pub creator: AccountId,
    pub created_at: DateTime<Utc>,
}

pub struct FundFactory {
    oracle: Rc<dyn PriceOracle>,
    router: Rc<dyn SwapRouter>,
    fee_token: Rc<dyn FeeToken>,
    treasury: AccountId,
    creation_fee: u128,
    funds: Vec<RegistryEntry>,
    by_creator: HashMap<AccountId, Vec<usize>>,
}

impl FundFactory {
    pub fn new(
        oracle: Rc<dyn PriceOracle>,
        router: Rc<dyn SwapRouter>,
        fee_token: Rc<dyn FeeToken>,
        treasury: AccountId,
        creation_fee: u128,
    ) -> Self {
        FundFactory {
            oracle,
            router,
            fee_token,
            treasury,
            creation_fee,
            funds: Vec::new(),
            by_creator: HashMap::new(),
        }
    }

    /// Create a fund over `assets`, charging the creation fee. Validation
    /// runs before the fee transfer, and the fee transfer before any
    /// registry mutation, so a failure at either step leaves the registry
    /// untouched and the creator uncharged where possible.
    ///
    /// Returns the new fund's sequence number.
    pub fn create_fund(
        &mut self,
        creator: &AccountId,
        name: &str,
        symbol: &str,
        assets: Vec<AssetId>,
    ) -> Result<usize, FundError> {
        validate_underlying(&assets)?;
        self.fee_token
            .transfer_from(creator, &self.treasury, self.creation_fee)?;

        let fund = Fund::new(
            name,
            symbol,
            creator.clone(),
            assets,
            Rc::clone(&self.oracle),
            Rc::clone(&self.router),
        )?;
        let index = self.funds.len();
        self.funds.push(RegistryEntry {
            fund: Rc::new(RefCell::new(fund)),
            creator: creator.clone(),
            created_at: Utc::now(),
        });
        self.by_creator
            .entry(creator.clone())
            .or_default()
            .push(index);
        Ok(index)
    }

    pub fn fund_count(&self) -> usize {
        self.funds.len()
    }

    pub fn fund_at(&self, index: usize) -> Option<Rc<RefCell<Fund>>> {
        self.funds.get(index).map(|entry| Rc::clone(&entry.fund))
    }

    pub fn entry_at(&self, index: usize) -> Option<&RegistryEntry> {
        self.funds.get(index)
    }

    pub fn funds_by(&self, creator: &AccountId) -> &[usize] {
        self.by_creator
            .get(creator)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn creation_fee(&self) -> u128 {
        self.creation_fee
    }

    pub fn treasury(&self) -> &AccountId {
        &self.treasury
    }
}
