//! Swap execution capability.

use crate::domain::asset::AssetId;
use crate::domain::error::FundError;

/// External asset-exchange service. Either leg may be the native sentinel.
/// A swap fails as an error rather than filling partially.
pub trait SwapRouter {
    fn swap(&self, from: &AssetId, to: &AssetId, amount_in: u128) -> Result<u128, FundError>;
}
