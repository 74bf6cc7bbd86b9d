//! Fungible share ledger.
//!
//! Shares are minted only on deposit and burned only on redemption; the
//! cached total is updated in the same checked step as the holder balance,
//! so the total always equals the sum of individual balances.

use std::collections::HashMap;

use super::asset::AccountId;
use super::error::FundError;

#[derive(Debug, Clone, Default)]
pub struct ShareLedger {
    balances: HashMap<AccountId, u128>,
    total: u128,
}

impl ShareLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> u128 {
        self.total
    }

    pub fn balance_of(&self, holder: &AccountId) -> u128 {
        self.balances.get(holder).copied().unwrap_or(0)
    }

    pub fn mint(&mut self, holder: &AccountId, amount: u128) -> Result<(), FundError> {
        let balance = self.balance_of(holder);
        let new_balance = balance
            .checked_add(amount)
            .ok_or(FundError::ArithmeticOverflow)?;
        let new_total = self
            .total
            .checked_add(amount)
            .ok_or(FundError::ArithmeticOverflow)?;
        self.balances.insert(holder.clone(), new_balance);
        self.total = new_total;
        Ok(())
    }

    pub fn burn(&mut self, holder: &AccountId, amount: u128) -> Result<(), FundError> {
        let balance = self.balance_of(holder);
        if balance < amount {
            return Err(FundError::InsufficientShares {
                holder: holder.to_string(),
                have: balance,
                requested: amount,
            });
        }
        self.balances.insert(holder.clone(), balance - amount);
        // total >= balance >= amount, so this cannot underflow
        self.total -= amount;
        Ok(())
    }
}
