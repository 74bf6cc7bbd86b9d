//! Scenario configuration validation.
//!
//! The CLI drives the engine from an INI file: oracle prices, router
//! slippage, factory fee/treasury, the fund to create, and the scripted
//! deposit. Validation happens once here so the runner can assume a
//! well-formed [`ScenarioConfig`].

use super::asset::{AccountId, AssetId};
use super::error::FundError;
use super::proportions::TOTAL_WEIGHT;
use crate::ports::config_port::ConfigPort;

#[derive(Debug, Clone)]
pub struct ScenarioConfig {
    /// Oracle quotes, native first.
    pub prices: Vec<(AssetId, u128)>,
    pub slippage_bps: u32,
    pub creation_fee: u128,
    pub treasury: AccountId,
    pub fund_name: String,
    pub fund_symbol: String,
    pub assets: Vec<AssetId>,
    pub creator: AccountId,
    pub deposit: u128,
    /// Optional post-deposit reallocation, parallel to `assets`.
    pub proportions: Option<Vec<u32>>,
}

fn required_string(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<String, FundError> {
    config
        .get_string(section, key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| FundError::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        })
}

fn required_amount(config: &dyn ConfigPort, section: &str, key: &str) -> Result<u128, FundError> {
    let raw = required_string(config, section, key)?;
    config
        .get_amount(section, key)
        .ok_or_else(|| FundError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: format!("{raw} is not a base-unit amount"),
        })
}

/// Parse a comma-separated asset list into uppercase token identifiers,
/// rejecting empty entries and duplicates.
pub fn parse_assets(input: &str) -> Result<Vec<AssetId>, FundError> {
    let mut assets: Vec<AssetId> = Vec::new();
    for token in input.split(',') {
        let symbol = token.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(FundError::ConfigInvalid {
                section: "fund".to_string(),
                key: "assets".to_string(),
                reason: "empty entry in asset list".to_string(),
            });
        }
        let asset = AssetId::token(symbol);
        if assets.contains(&asset) {
            return Err(FundError::DuplicateAsset {
                asset: asset.to_string(),
            });
        }
        assets.push(asset);
    }
    Ok(assets)
}

pub fn validate_scenario_config(config: &dyn ConfigPort) -> Result<ScenarioConfig, FundError> {
    let assets = parse_assets(&required_string(config, "fund", "assets")?)?;

    // Native quote first, then one quote per underlying; configparser keys
    // are lowercase, so token symbols are looked up lowercased.
    let mut prices = vec![(AssetId::Native, required_amount(config, "oracle", "native")?)];
    for asset in &assets {
        let key = asset.to_string().to_lowercase();
        prices.push((asset.clone(), required_amount(config, "oracle", &key)?));
    }

    let slippage_bps = config.get_int("router", "slippage_bps", 0);
    if !(0..=10_000).contains(&slippage_bps) {
        return Err(FundError::ConfigInvalid {
            section: "router".to_string(),
            key: "slippage_bps".to_string(),
            reason: format!("{slippage_bps} is outside 0..=10000"),
        });
    }

    let proportions = match config.get_string("scenario", "proportions") {
        None => None,
        Some(raw) => {
            let mut weights = Vec::new();
            for part in raw.split(',') {
                let weight: u32 =
                    part.trim()
                        .parse()
                        .map_err(|_| FundError::ConfigInvalid {
                            section: "scenario".to_string(),
                            key: "proportions".to_string(),
                            reason: format!("{} is not a weight", part.trim()),
                        })?;
                weights.push(weight);
            }
            if weights.len() != assets.len() {
                return Err(FundError::ConfigInvalid {
                    section: "scenario".to_string(),
                    key: "proportions".to_string(),
                    reason: format!(
                        "{} weights for {} assets",
                        weights.len(),
                        assets.len()
                    ),
                });
            }
            let sum: u32 = weights.iter().sum();
            if sum != TOTAL_WEIGHT {
                return Err(FundError::ConfigInvalid {
                    section: "scenario".to_string(),
                    key: "proportions".to_string(),
                    reason: format!("weights sum to {sum}, expected {TOTAL_WEIGHT}"),
                });
            }
            Some(weights)
        }
    };

    let deposit = required_amount(config, "scenario", "deposit")?;
    if deposit == 0 {
        return Err(FundError::ConfigInvalid {
            section: "scenario".to_string(),
            key: "deposit".to_string(),
            reason: "deposit must be greater than zero".to_string(),
        });
    }

    Ok(ScenarioConfig {
        prices,
        slippage_bps: slippage_bps as u32,
        creation_fee: required_amount(config, "factory", "creation_fee")?,
        treasury: AccountId::new(required_string(config, "factory", "treasury")?),
        fund_name: required_string(config, "fund", "name")?,
        fund_symbol: required_string(config, "fund", "symbol")?,
        assets,
        creator: AccountId::new(required_string(config, "scenario", "creator")?),
        deposit,
        proportions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    const VALID: &str = r#"
[oracle]
native = 200000000000
mta = 100000000000
mtb = 50000000000

[router]
slippage_bps = 30

[factory]
creation_fee = 1000000000000000000
treasury = treasury

[fund]
name = Integration Fund
symbol = IFD
assets = MTA,MTB

[scenario]
creator = alice
deposit = 1000000000000000000
proportions = 70,30
"#;

    fn adapter(content: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(content).unwrap()
    }

    #[test]
    fn valid_config_parses() {
        let config = validate_scenario_config(&adapter(VALID)).unwrap();
        assert_eq!(config.fund_name, "Integration Fund");
        assert_eq!(config.fund_symbol, "IFD");
        assert_eq!(config.assets.len(), 2);
        assert_eq!(config.prices.len(), 3);
        assert_eq!(config.prices[0].0, AssetId::Native);
        assert_eq!(config.slippage_bps, 30);
        assert_eq!(config.creator, AccountId::new("alice"));
        assert_eq!(config.proportions, Some(vec![70, 30]));
    }

    #[test]
    fn missing_price_for_listed_asset_is_reported() {
        let err = validate_scenario_config(&adapter(&VALID.replace("mtb = 50000000000", "")))
            .unwrap_err();
        assert!(matches!(
            err,
            FundError::ConfigMissing { section, key }
                if section == "oracle" && key == "mtb"
        ));
    }

    #[test]
    fn malformed_amount_is_reported_with_location() {
        let err = validate_scenario_config(&adapter(
            &VALID.replace("deposit = 1000000000000000000", "deposit = one-ether"),
        ))
        .unwrap_err();
        assert!(matches!(
            err,
            FundError::ConfigInvalid { section, key, .. }
                if section == "scenario" && key == "deposit"
        ));
    }

    #[test]
    fn duplicate_asset_rejected() {
        let err = validate_scenario_config(&adapter(
            &VALID.replace("assets = MTA,MTB", "assets = MTA,mta"),
        ))
        .unwrap_err();
        assert!(matches!(err, FundError::DuplicateAsset { .. }));
    }

    #[test]
    fn proportions_must_match_assets_and_sum() {
        let err = validate_scenario_config(&adapter(
            &VALID.replace("proportions = 70,30", "proportions = 70,40"),
        ))
        .unwrap_err();
        assert!(matches!(err, FundError::ConfigInvalid { .. }));

        let err = validate_scenario_config(&adapter(
            &VALID.replace("proportions = 70,30", "proportions = 100"),
        ))
        .unwrap_err();
        assert!(matches!(err, FundError::ConfigInvalid { .. }));
    }

    #[test]
    fn proportions_are_optional() {
        let config = validate_scenario_config(&adapter(
            &VALID.replace("proportions = 70,30", ""),
        ))
        .unwrap();
        assert_eq!(config.proportions, None);
    }

    #[test]
    fn zero_deposit_rejected() {
        let err = validate_scenario_config(&adapter(
            &VALID.replace("deposit = 1000000000000000000", "deposit = 0"),
        ))
        .unwrap_err();
        assert!(matches!(err, FundError::ConfigInvalid { .. }));
    }

    #[test]
    fn out_of_range_slippage_rejected() {
        let err = validate_scenario_config(&adapter(
            &VALID.replace("slippage_bps = 30", "slippage_bps = 10001"),
        ))
        .unwrap_err();
        assert!(matches!(err, FundError::ConfigInvalid { .. }));
    }

    #[test]
    fn parse_assets_uppercases_symbols() {
        let assets = parse_assets("mta, mtb").unwrap();
        assert_eq!(assets, vec![AssetId::token("MTA"), AssetId::token("MTB")]);
    }
}
