//! Asset and account identifiers plus the fixed-point arithmetic helpers
//! the whole engine is built on.
//!
//! All quantities are integer base units: native value and token balances
//! carry 18 decimals ([`ONE`]), oracle prices carry 8 decimals
//! ([`PRICE_SCALE`]). Every multiply is checked; overflow aborts the
//! enclosing operation.

use std::fmt;

use super::error::FundError;

/// One whole unit of native value or of any token (18 decimals).
pub const ONE: u128 = 1_000_000_000_000_000_000;

/// One whole quote unit in oracle prices (8 decimals).
pub const PRICE_SCALE: u128 = 100_000_000;

/// Basis-point denominator for router slippage.
pub const BPS_DENOM: u128 = 10_000;

/// Identifier of a swappable asset. `Native` is the sentinel for the
/// ledger's native value; it sorts before every token so deterministic
/// passes ordered by asset id are stable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssetId {
    Native,
    Token(String),
}

impl AssetId {
    pub fn token(symbol: impl Into<String>) -> Self {
        AssetId::Token(symbol.into())
    }

    pub fn is_native(&self) -> bool {
        matches!(self, AssetId::Native)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetId::Native => write!(f, "NATIVE"),
            AssetId::Token(symbol) => write!(f, "{symbol}"),
        }
    }
}

/// Opaque account identity (holder, creator, treasury).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(name: impl Into<String>) -> Self {
        AccountId(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Checked `a * b / denom` with floor division.
pub fn mul_div(a: u128, b: u128, denom: u128) -> Result<u128, FundError> {
    if denom == 0 {
        return Err(FundError::ArithmeticOverflow);
    }
    a.checked_mul(b)
        .map(|product| product / denom)
        .ok_or(FundError::ArithmeticOverflow)
}

/// Value of `amount` base units at `price` quote-per-whole-unit, in quote
/// units (8 decimals).
pub fn quote_value(amount: u128, price: u128) -> Result<u128, FundError> {
    mul_div(amount, price, ONE)
}
