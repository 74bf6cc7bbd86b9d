//! Target allocation weights.
//!
//! Weights over the underlying assets always sum to [`TOTAL_WEIGHT`]. The
//! set is replaced atomically as a whole: a replacement must list every
//! underlying exactly once, since a partial update could not keep the sum
//! invariant without guessing at the unlisted weights.

use std::collections::{HashMap, HashSet};

use super::asset::AssetId;
use super::error::FundError;

/// Fixed total the weights of all underlying assets must sum to.
pub const TOTAL_WEIGHT: u32 = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct ProportionSet {
    weights: HashMap<AssetId, u32>,
}

impl ProportionSet {
    /// Initial allocation at fund creation: `TOTAL_WEIGHT / n` per asset,
    /// with the integer remainder added to the first asset.
    pub fn equal_split(assets: &[AssetId]) -> Result<Self, FundError> {
        if assets.is_empty() {
            return Err(FundError::EmptyAssetList);
        }
        let n = assets.len() as u32;
        let base = TOTAL_WEIGHT / n;
        let remainder = TOTAL_WEIGHT - base * n;
        let weights = assets
            .iter()
            .enumerate()
            .map(|(i, asset)| {
                let weight = if i == 0 { base + remainder } else { base };
                (asset.clone(), weight)
            })
            .collect();
        Ok(ProportionSet { weights })
    }

    /// Validate and build a full replacement set. `assets` must be a
    /// permutation of `underlying` and `weights` must sum to
    /// [`TOTAL_WEIGHT`]; any violation leaves the caller's current set
    /// untouched.
    pub fn replace(
        underlying: &[AssetId],
        assets: &[AssetId],
        weights: &[u32],
    ) -> Result<Self, FundError> {
        if assets.len() != weights.len() {
            return Err(FundError::ProportionLengthMismatch {
                assets: assets.len(),
                weights: weights.len(),
            });
        }
        if assets.len() != underlying.len() {
            return Err(FundError::ProportionCoverage {
                listed: assets.len(),
                expected: underlying.len(),
            });
        }

        let known: HashSet<&AssetId> = underlying.iter().collect();
        let mut seen = HashSet::new();
        for asset in assets {
            if !known.contains(asset) {
                return Err(FundError::UnknownAsset {
                    asset: asset.to_string(),
                });
            }
            if !seen.insert(asset) {
                return Err(FundError::DuplicateAsset {
                    asset: asset.to_string(),
                });
            }
        }

        let set = ProportionSet {
            weights: assets.iter().cloned().zip(weights.iter().copied()).collect(),
        };
        let sum = set.sum();
        if sum != TOTAL_WEIGHT {
            return Err(FundError::ProportionSumInvalid {
                sum,
                expected: TOTAL_WEIGHT,
            });
        }
        Ok(set)
    }

    /// Weight for an asset; unknown assets weigh zero.
    pub fn weight(&self, asset: &AssetId) -> u32 {
        self.weights.get(asset).copied().unwrap_or(0)
    }

    pub fn sum(&self) -> u32 {
        self.weights.values().sum()
    }
}
