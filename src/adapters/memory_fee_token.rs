//! In-memory fee token with allowances.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::domain::asset::AccountId;
use crate::domain::error::FundError;
use crate::ports::fee_token::FeeToken;

/// Balances plus a per-owner spending allowance for the factory. `mint` and
/// `approve` are test/scenario helpers outside the port surface.
#[derive(Default)]
pub struct MemoryFeeToken {
    balances: RefCell<HashMap<AccountId, u128>>,
    allowances: RefCell<HashMap<AccountId, u128>>,
}

impl MemoryFeeToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mint(&self, account: &AccountId, amount: u128) -> Result<(), FundError> {
        let new_balance = self
            .balance_of(account)
            .checked_add(amount)
            .ok_or(FundError::ArithmeticOverflow)?;
        self.balances.borrow_mut().insert(account.clone(), new_balance);
        Ok(())
    }

    pub fn approve(&self, owner: &AccountId, amount: u128) {
        self.allowances.borrow_mut().insert(owner.clone(), amount);
    }

    pub fn balance_of(&self, account: &AccountId) -> u128 {
        self.balances.borrow().get(account).copied().unwrap_or(0)
    }

    pub fn allowance(&self, owner: &AccountId) -> u128 {
        self.allowances.borrow().get(owner).copied().unwrap_or(0)
    }
}

impl FeeToken for MemoryFeeToken {
    fn transfer_from(
        &self,
        payer: &AccountId,
        recipient: &AccountId,
        amount: u128,
    ) -> Result<(), FundError> {
        if amount == 0 {
            return Ok(());
        }
        let allowance = self.allowance(payer);
        if allowance < amount {
            return Err(FundError::FeeTransferFailed {
                reason: format!("allowance {allowance} below required {amount} for {payer}"),
            });
        }
        let balance = self.balance_of(payer);
        if balance < amount {
            return Err(FundError::FeeTransferFailed {
                reason: format!("balance {balance} below required {amount} for {payer}"),
            });
        }

        // stage the recipient credit before mutating anything
        let credited = self
            .balance_of(recipient)
            .checked_add(amount)
            .ok_or(FundError::ArithmeticOverflow)?;

        let mut balances = self.balances.borrow_mut();
        balances.insert(payer.clone(), balance - amount);
        balances.insert(recipient.clone(), credited);
        self.allowances
            .borrow_mut()
            .insert(payer.clone(), allowance - amount);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> AccountId {
        AccountId::new("alice")
    }

    fn treasury() -> AccountId {
        AccountId::new("treasury")
    }

    #[test]
    fn transfer_from_moves_balance_and_spends_allowance() {
        let token = MemoryFeeToken::new();
        token.mint(&alice(), 100).unwrap();
        token.approve(&alice(), 60);

        token.transfer_from(&alice(), &treasury(), 40).unwrap();

        assert_eq!(token.balance_of(&alice()), 60);
        assert_eq!(token.balance_of(&treasury()), 40);
        assert_eq!(token.allowance(&alice()), 20);
    }

    #[test]
    fn transfer_from_without_allowance_fails() {
        let token = MemoryFeeToken::new();
        token.mint(&alice(), 100).unwrap();

        let err = token.transfer_from(&alice(), &treasury(), 40).unwrap_err();
        assert!(matches!(err, FundError::FeeTransferFailed { .. }));
        assert_eq!(token.balance_of(&alice()), 100);
        assert_eq!(token.balance_of(&treasury()), 0);
    }

    #[test]
    fn transfer_from_without_balance_fails() {
        let token = MemoryFeeToken::new();
        token.approve(&alice(), 100);

        let err = token.transfer_from(&alice(), &treasury(), 40).unwrap_err();
        assert!(matches!(err, FundError::FeeTransferFailed { .. }));
        assert_eq!(token.allowance(&alice()), 100);
    }

    #[test]
    fn zero_transfer_is_a_no_op() {
        let token = MemoryFeeToken::new();
        token.transfer_from(&alice(), &treasury(), 0).unwrap();
        assert_eq!(token.balance_of(&treasury()), 0);
    }

    #[test]
    fn mint_overflow_rejected() {
        let token = MemoryFeeToken::new();
        token.mint(&alice(), u128::MAX).unwrap();

        let err = token.mint(&alice(), 1).unwrap_err();
        assert!(matches!(err, FundError::ArithmeticOverflow));
        assert_eq!(token.balance_of(&alice()), u128::MAX);
    }

    #[test]
    fn transfer_overflowing_the_recipient_fails_without_change() {
        let token = MemoryFeeToken::new();
        token.mint(&alice(), 1).unwrap();
        token.approve(&alice(), 1);
        token.mint(&treasury(), u128::MAX).unwrap();

        let err = token.transfer_from(&alice(), &treasury(), 1).unwrap_err();
        assert!(matches!(err, FundError::ArithmeticOverflow));
        assert_eq!(token.balance_of(&alice()), 1);
        assert_eq!(token.allowance(&alice()), 1);
        assert_eq!(token.balance_of(&treasury()), u128::MAX);
    }
}
