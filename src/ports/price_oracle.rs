//! Price lookup capability.

use crate::domain::asset::AssetId;
use crate::domain::error::FundError;

/// External price-quoting service. Prices are quote units per whole asset
/// unit, 8 decimals. Queried per asset per valuation; never cached across
/// operations.
pub trait PriceOracle {
    fn price(&self, asset: &AssetId) -> Result<u128, FundError>;
}
