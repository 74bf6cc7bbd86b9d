//! Swap router priced off a shared oracle.
//!
//! Output is `amount_in * price_from / price_to` less a configurable
//! slippage in basis points. Supports failure injection on the Nth call so
//! tests can verify that a mid-operation router failure rolls the whole
//! operation back.

use std::cell::Cell;
use std::rc::Rc;

use crate::domain::asset::{mul_div, AssetId, BPS_DENOM};
use crate::domain::error::FundError;
use crate::ports::price_oracle::PriceOracle;
use crate::ports::swap_router::SwapRouter;

pub struct OracleRouter {
    oracle: Rc<dyn PriceOracle>,
    slippage_bps: u128,
    fail_on_call: Cell<Option<usize>>,
    calls: Cell<usize>,
}

impl OracleRouter {
    pub fn new(oracle: Rc<dyn PriceOracle>, slippage_bps: u32) -> Self {
        OracleRouter {
            oracle,
            slippage_bps: slippage_bps as u128,
            fail_on_call: Cell::new(None),
            calls: Cell::new(0),
        }
    }

    /// Inject a failure on the zero-based `n`th swap call from now on.
    pub fn fail_on_call(&self, n: usize) {
        self.fail_on_call.set(Some(n));
    }

    pub fn clear_failure(&self) {
        self.fail_on_call.set(None);
    }

    /// Total swap calls seen so far.
    pub fn calls(&self) -> usize {
        self.calls.get()
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
}

impl SwapRouter for OracleRouter {
    fn swap(&self, from: &AssetId, to: &AssetId, amount_in: u128) -> Result<u128, FundError> {
        let call = self.calls.get();
        self.calls.set(call + 1);
        if self.fail_on_call.get() == Some(call) {
            return Err(FundError::SwapFailed {
                from: from.to_string(),
                to: to.to_string(),
                reason: "injected router failure".to_string(),
            });
        }
        if amount_in == 0 {
            return Ok(0);
        }
        let price_from = self.price_of(from)?;
        let price_to = self.price_of(to)?;
        let gross = mul_div(amount_in, price_from, price_to)?;
        mul_div(gross, BPS_DENOM - self.slippage_bps, BPS_DENOM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory_oracle::MemoryOracle;
    use crate::domain::asset::{ONE, PRICE_SCALE};

    fn make_router(slippage_bps: u32) -> OracleRouter {
        let oracle = Rc::new(
            MemoryOracle::new()
                .with_price(AssetId::Native, 2000 * PRICE_SCALE)
                .with_price(AssetId::token("MTA"), 1000 * PRICE_SCALE),
        );
        OracleRouter::new(oracle as Rc<dyn PriceOracle>, slippage_bps)
    }

    #[test]
    fn swap_converts_at_oracle_ratio() {
        let router = make_router(0);
        let out = router
            .swap(&AssetId::Native, &AssetId::token("MTA"), ONE)
            .unwrap();
        assert_eq!(out, 2 * ONE);

        let back = router
            .swap(&AssetId::token("MTA"), &AssetId::Native, out)
            .unwrap();
        assert_eq!(back, ONE);
    }

    #[test]
    fn swap_applies_slippage() {
        let router = make_router(50); // 0.5%
        let out = router
            .swap(&AssetId::Native, &AssetId::token("MTA"), ONE)
            .unwrap();
        assert_eq!(out, 2 * ONE * 9950 / 10_000);
    }

    #[test]
    fn swap_of_zero_is_zero() {
        let router = make_router(0);
        assert_eq!(
            router
                .swap(&AssetId::Native, &AssetId::token("MTA"), 0)
                .unwrap(),
            0
        );
    }

    #[test]
    fn unknown_asset_fails() {
        let router = make_router(0);
        assert!(matches!(
            router.swap(&AssetId::Native, &AssetId::token("XYZ"), ONE),
            Err(FundError::PriceUnavailable { .. })
        ));
    }

    #[test]
    fn injected_failure_hits_the_requested_call() {
        let router = make_router(0);
        router.fail_on_call(1);

        assert!(router
            .swap(&AssetId::Native, &AssetId::token("MTA"), ONE)
            .is_ok());
        assert!(matches!(
            router.swap(&AssetId::Native, &AssetId::token("MTA"), ONE),
            Err(FundError::SwapFailed { .. })
        ));
        // only the injected call fails
        assert!(router
            .swap(&AssetId::Native, &AssetId::token("MTA"), ONE)
            .is_ok());
        assert_eq!(router.calls(), 3);
    }
}
