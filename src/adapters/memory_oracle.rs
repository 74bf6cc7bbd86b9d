//! In-memory settable price oracle.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::domain::asset::AssetId;
use crate::domain::error::FundError;
use crate::ports::price_oracle::PriceOracle;

/// Price map with interior mutability so prices can move while funds hold a
/// shared handle. Backs both tests and the CLI scenario runner.
#[derive(Default)]
pub struct MemoryOracle {
    prices: RefCell<HashMap<AssetId, u128>>,
}

impl MemoryOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(self, asset: AssetId, price: u128) -> Self {
        self.set_price(asset, price);
        self
    }

    pub fn set_price(&self, asset: AssetId, price: u128) {
        self.prices.borrow_mut().insert(asset, price);
    }
}

impl PriceOracle for MemoryOracle {
    fn price(&self, asset: &AssetId) -> Result<u128, FundError> {
        self.prices
            .borrow()
            .get(asset)
            .copied()
            .ok_or_else(|| FundError::PriceUnavailable {
                asset: asset.to_string(),
            })
    }
}
