//! Fund accounting and execution engine.
//!
//! A fund owns a basket of token balances plus native value, issues fungible
//! shares against the basket, and converts value in and out through the
//! bound [`SwapRouter`], priced by the bound [`PriceOracle`].
//!
//! Every mutating operation runs under the per-fund reentrancy lock and is
//! staged before it is committed: all oracle and router calls complete, and
//! every resulting balance is computed with checked arithmetic, before any
//! field of the fund is touched. A failure at any point therefore leaves no
//! observable effect.

use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

use super::asset::{mul_div, quote_value, AccountId, AssetId, ONE};
use super::error::FundError;
use super::ledger::ShareLedger;
use super::proportions::{ProportionSet, TOTAL_WEIGHT};
use crate::ports::price_oracle::PriceOracle;
use crate::ports::swap_router::SwapRouter;

/// Resource bound on the underlying asset list.
pub const MAX_UNDERLYING: usize = 10;

/// Append-only activity log entry.
#[derive(Debug, Clone)]
pub struct FundEvent {
    pub at: DateTime<Utc>,
    pub kind: FundEventKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FundEventKind {
    Created,
    Deposit {
        holder: AccountId,
        value_in: u128,
        shares_minted: u128,
    },
    Redemption {
        holder: AccountId,
        shares_burned: u128,
        payout: u128,
    },
    ProportionsUpdated,
    Rebalanced {
        swaps: usize,
    },
}

/// Validate an underlying asset list: non-empty, bounded, unique, tokens
/// only. Shared by the factory (before charging the fee) and the fund
/// constructor.
pub fn validate_underlying(assets: &[AssetId]) -> Result<(), FundError> {
    if assets.is_empty() {
        return Err(FundError::EmptyAssetList);
    }
    if assets.len() > MAX_UNDERLYING {
        return Err(FundError::TooManyAssets {
            count: assets.len(),
            max: MAX_UNDERLYING,
        });
    }
    let mut seen = HashSet::new();
    for asset in assets {
        if asset.is_native() {
            return Err(FundError::NativeUnderlying);
        }
        if !seen.insert(asset) {
            return Err(FundError::DuplicateAsset {
                asset: asset.to_string(),
            });
        }
    }
    Ok(())
}

pub struct Fund {
    name: String,
    symbol: String,
    creator: AccountId,
    underlying: Vec<AssetId>,
    proportions: ProportionSet,
    asset_balances: HashMap<AssetId, u128>,
    native_balance: u128,
    ledger: ShareLedger,
    oracle: Rc<dyn PriceOracle>,
    router: Rc<dyn SwapRouter>,
    locked: bool,
    events: Vec<FundEvent>,
}

// manual impl: the oracle and router handles have no Debug surface
impl fmt::Debug for Fund {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fund")
            .field("name", &self.name)
            .field("symbol", &self.symbol)
            .field("creator", &self.creator)
            .field("underlying", &self.underlying)
            .field("proportions", &self.proportions)
            .field("asset_balances", &self.asset_balances)
            .field("native_balance", &self.native_balance)
            .field("ledger", &self.ledger)
            .field("locked", &self.locked)
            .finish_non_exhaustive()
    }
}

impl Fund {
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        creator: AccountId,
        underlying: Vec<AssetId>,
        oracle: Rc<dyn PriceOracle>,
        router: Rc<dyn SwapRouter>,
    ) -> Result<Self, FundError> {
        validate_underlying(&underlying)?;
        let proportions = ProportionSet::equal_split(&underlying)?;
        let mut fund = Fund {
            name: name.into(),
            symbol: symbol.into(),
            creator,
            underlying,
            proportions,
            asset_balances: HashMap::new(),
            native_balance: 0,
            ledger: ShareLedger::new(),
            oracle,
            router,
            locked: false,
            events: Vec::new(),
        };
        fund.record(FundEventKind::Created);
        Ok(fund)
    }

    // --- reads ---

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn creator(&self) -> &AccountId {
        &self.creator
    }

    pub fn underlying_tokens(&self) -> &[AssetId] {
        &self.underlying
    }

    pub fn token_balance(&self, asset: &AssetId) -> u128 {
        self.asset_balances.get(asset).copied().unwrap_or(0)
    }

    pub fn native_balance(&self) -> u128 {
        self.native_balance
    }

    pub fn balance_of(&self, holder: &AccountId) -> u128 {
        self.ledger.balance_of(holder)
    }

    pub fn total_shares(&self) -> u128 {
        self.ledger.total()
    }

    pub fn target_proportion(&self, asset: &AssetId) -> u32 {
        self.proportions.weight(asset)
    }

    pub fn events(&self) -> &[FundEvent] {
        &self.events
    }

    /// Total fund value in quote units: native balance plus every nonzero
    /// token position, each priced through the oracle. A zero or missing
    /// price for a nonzero position fails the whole valuation; zero-balance
    /// positions are not quoted at all.
    pub fn fund_value(&self) -> Result<u128, FundError> {
        let mut total = 0u128;
        if self.native_balance > 0 {
            let price = self.price_of(&AssetId::Native)?;
            total = quote_value(self.native_balance, price)?;
        }
        for asset in &self.underlying {
            let balance = self.token_balance(asset);
            if balance == 0 {
                continue;
            }
            let value = quote_value(balance, self.price_of(asset)?)?;
            total = total
                .checked_add(value)
                .ok_or(FundError::ArithmeticOverflow)?;
        }
        Ok(total)
    }

    // --- operations ---

    /// Deposit `value` of native value; returns the shares minted.
    pub fn buy(&mut self, holder: &AccountId, value: u128) -> Result<u128, FundError> {
        self.with_lock(|fund| fund.buy_inner(holder, value))
    }

    /// Redeem `shares` of the holder's balance; returns the native payout.
    pub fn sell(&mut self, holder: &AccountId, shares: u128) -> Result<u128, FundError> {
        self.with_lock(|fund| fund.sell_inner(holder, shares))
    }

    /// Replace the target proportions, creator-only. Prospective: takes
    /// effect on the next buy's allocation split, does not move holdings.
    pub fn set_proportions(
        &mut self,
        caller: &AccountId,
        assets: &[AssetId],
        weights: &[u32],
    ) -> Result<(), FundError> {
        self.with_lock(|fund| fund.set_proportions_inner(caller, assets, weights))
    }

    /// Move existing holdings toward the target allocation, creator-only.
    /// Returns the number of swaps issued.
    pub fn rebalance(&mut self, caller: &AccountId) -> Result<usize, FundError> {
        self.with_lock(|fund| fund.rebalance_inner(caller))
    }

    // --- internals ---

    fn with_lock<T>(
        &mut self,
        op: impl FnOnce(&mut Self) -> Result<T, FundError>,
    ) -> Result<T, FundError> {
        if self.locked {
            return Err(FundError::ReentrantCall {
                fund: self.name.clone(),
            });
        }
        self.locked = true;
        let outcome = op(self);
        self.locked = false;
        outcome
    }

    fn price_of(&self, asset: &AssetId) -> Result<u128, FundError> {
        let price = self.oracle.price(asset)?;
        if price == 0 {
            return Err(FundError::PriceUnavailable {
                asset: asset.to_string(),
            });
        }
        Ok(price)
    }

    fn record(&mut self, kind: FundEventKind) {
        self.events.push(FundEvent {
            at: Utc::now(),
            kind,
        });
    }

    fn buy_inner(&mut self, holder: &AccountId, value: u128) -> Result<u128, FundError> {
        if value == 0 {
            return Err(FundError::ZeroDeposit);
        }

        // Pre-deposit valuation, before any swap is counted.
        let pre_value = self.fund_value()?;

        // Split the deposit per target weight. The final underlying absorbs
        // the integer remainder so no native dust is left behind.
        let mut slices = Vec::with_capacity(self.underlying.len());
        let mut allocated = 0u128;
        for (i, asset) in self.underlying.iter().enumerate() {
            let weight = self.proportions.weight(asset);
            let slice = if i + 1 == self.underlying.len() {
                value - allocated
            } else {
                mul_div(value, weight as u128, TOTAL_WEIGHT as u128)?
            };
            allocated += slice;
            slices.push(slice);
        }

        // Stage: run every swap before touching any balance. A failed or
        // zero-output swap aborts with the fund untouched.
        let mut new_balances = Vec::with_capacity(self.underlying.len());
        for (asset, slice) in self.underlying.iter().zip(&slices) {
            if *slice == 0 {
                continue;
            }
            let received = self.router.swap(&AssetId::Native, asset, *slice)?;
            if received == 0 {
                return Err(FundError::SwapFailed {
                    from: AssetId::Native.to_string(),
                    to: asset.to_string(),
                    reason: "router returned zero output".to_string(),
                });
            }
            let balance = self
                .token_balance(asset)
                .checked_add(received)
                .ok_or(FundError::ArithmeticOverflow)?;
            new_balances.push((asset.clone(), balance));
        }

        // Stage the mint: one share-unit per unit of native value on the
        // first deposit, proportional to pre-deposit value afterwards.
        let minted = if self.ledger.total() == 0 {
            value
        } else {
            let value_added = quote_value(value, self.price_of(&AssetId::Native)?)?;
            mul_div(self.ledger.total(), value_added, pre_value)?
        };
        if minted == 0 {
            return Err(FundError::SharesNotMinted { value });
        }
        self.ledger
            .total()
            .checked_add(minted)
            .ok_or(FundError::ArithmeticOverflow)?;

        // Commit.
        for (asset, balance) in new_balances {
            self.asset_balances.insert(asset, balance);
        }
        self.ledger.mint(holder, minted)?;
        self.record(FundEventKind::Deposit {
            holder: holder.clone(),
            value_in: value,
            shares_minted: minted,
        });
        Ok(minted)
    }

    fn sell_inner(&mut self, holder: &AccountId, shares: u128) -> Result<u128, FundError> {
        if shares == 0 {
            return Err(FundError::ZeroShareAmount);
        }
        let held = self.ledger.balance_of(holder);
        if held < shares {
            return Err(FundError::InsufficientShares {
                holder: holder.to_string(),
                have: held,
                requested: shares,
            });
        }
        let total = self.ledger.total();

        // Stage: proportional slice of the native balance, plus one swap
        // back to native per nonzero token position. Balance decrements use
        // the exact staged quantities, not the swap outputs, so accounting
        // never couples to market slippage.
        let native_cut = mul_div(self.native_balance, shares, total)?;
        let mut payout = native_cut;
        let mut redemptions = Vec::with_capacity(self.underlying.len());
        for asset in &self.underlying {
            let balance = self.token_balance(asset);
            if balance == 0 {
                continue;
            }
            let quantity = mul_div(balance, shares, total)?;
            if quantity == 0 {
                continue;
            }
            let received = self.router.swap(asset, &AssetId::Native, quantity)?;
            payout = payout
                .checked_add(received)
                .ok_or(FundError::ArithmeticOverflow)?;
            redemptions.push((asset.clone(), quantity));
        }

        // Commit: balances and shares first, payout handed back last.
        self.native_balance -= native_cut;
        for (asset, quantity) in redemptions {
            // quantity <= balance by construction
            if let Some(balance) = self.asset_balances.get_mut(&asset) {
                *balance -= quantity;
            }
        }
        self.ledger.burn(holder, shares)?;
        self.record(FundEventKind::Redemption {
            holder: holder.clone(),
            shares_burned: shares,
            payout,
        });
        Ok(payout)
    }

    fn set_proportions_inner(
        &mut self,
        caller: &AccountId,
        assets: &[AssetId],
        weights: &[u32],
    ) -> Result<(), FundError> {
        if caller != &self.creator {
            return Err(FundError::Unauthorized {
                caller: caller.to_string(),
            });
        }
        self.proportions = ProportionSet::replace(&self.underlying, assets, weights)?;
        self.record(FundEventKind::ProportionsUpdated);
        Ok(())
    }

    fn rebalance_inner(&mut self, caller: &AccountId) -> Result<usize, FundError> {
        if caller != &self.creator {
            return Err(FundError::Unauthorized {
                caller: caller.to_string(),
            });
        }
        let total_value = self.fund_value()?;
        if total_value == 0 {
            return Ok(0);
        }
        let price_native = self.price_of(&AssetId::Native)?;

        let mut ordered = self.underlying.clone();
        ordered.sort();

        let mut staged: HashMap<AssetId, u128> = self.asset_balances.clone();
        let mut staged_native = self.native_balance;
        let mut swaps = 0usize;

        // Pass 1: surpluses in ascending asset-id order, swapped to native.
        for asset in &ordered {
            let balance = staged.get(asset).copied().unwrap_or(0);
            if balance == 0 {
                continue;
            }
            let price = self.price_of(asset)?;
            let current = quote_value(balance, price)?;
            let target = mul_div(
                total_value,
                self.proportions.weight(asset) as u128,
                TOTAL_WEIGHT as u128,
            )?;
            if current <= target {
                continue;
            }
            let surplus_units = mul_div(current - target, ONE, price)?.min(balance);
            if surplus_units == 0 {
                continue;
            }
            let received = self.router.swap(asset, &AssetId::Native, surplus_units)?;
            staged.insert(asset.clone(), balance - surplus_units);
            staged_native = staged_native
                .checked_add(received)
                .ok_or(FundError::ArithmeticOverflow)?;
            swaps += 1;
        }

        // Pass 2: deficits in ascending order, funded from staged native.
        for asset in &ordered {
            let balance = staged.get(asset).copied().unwrap_or(0);
            let current = if balance == 0 {
                0
            } else {
                quote_value(balance, self.price_of(asset)?)?
            };
            let target = mul_div(
                total_value,
                self.proportions.weight(asset) as u128,
                TOTAL_WEIGHT as u128,
            )?;
            if current >= target {
                continue;
            }
            let native_in = mul_div(target - current, ONE, price_native)?.min(staged_native);
            if native_in == 0 {
                continue;
            }
            let received = self.router.swap(&AssetId::Native, asset, native_in)?;
            staged.insert(
                asset.clone(),
                balance
                    .checked_add(received)
                    .ok_or(FundError::ArithmeticOverflow)?,
            );
            staged_native -= native_in;
            swaps += 1;
        }

        // Commit.
        self.asset_balances = staged;
        self.native_balance = staged_native;
        self.record(FundEventKind::Rebalanced { swaps });
        Ok(swaps)
    }
}
