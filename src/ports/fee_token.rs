//! Fee token capability.

use crate::domain::asset::AccountId;
use crate::domain::error::FundError;

/// Transferable balance used to pay the one-time fund-creation fee.
/// `transfer_from` is allowance-gated in the standard way.
pub trait FeeToken {
    fn transfer_from(
        &self,
        payer: &AccountId,
        recipient: &AccountId,
        amount: u128,
    ) -> Result<(), FundError>;
}
