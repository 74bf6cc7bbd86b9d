//! Domain error taxonomy.

/// Top-level error type for etherindex.
///
/// Variants fall into four groups: input validation (rejected before any
/// state change), external-dependency failures (oracle/router/fee token),
/// execution-safety rejections (reentrancy, overflow), and CLI config/export
/// errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FundError {
    #[error("deposit value must be greater than zero")]
    ZeroDeposit,

    #[error("share amount must be greater than zero")]
    ZeroShareAmount,

    #[error("deposit of {value} would mint zero shares")]
    SharesNotMinted { value: u128 },

    #[error("insufficient shares for {holder}: have {have}, requested {requested}")]
    InsufficientShares {
        holder: String,
        have: u128,
        requested: u128,
    },

    #[error("caller {caller} is not the fund creator")]
    Unauthorized { caller: String },

    #[error("underlying asset list is empty")]
    EmptyAssetList,

    #[error("too many underlying assets: {count} (maximum {max})")]
    TooManyAssets { count: usize, max: usize },

    #[error("duplicate asset: {asset}")]
    DuplicateAsset { asset: String },

    #[error("unknown asset: {asset}")]
    UnknownAsset { asset: String },

    #[error("native value cannot be an underlying asset")]
    NativeUnderlying,

    #[error("asset list has {assets} entries but weight list has {weights}")]
    ProportionLengthMismatch { assets: usize, weights: usize },

    #[error("proportions must cover all {expected} underlying assets, got {listed}")]
    ProportionCoverage { listed: usize, expected: usize },

    #[error("proportion weights sum to {sum}, expected {expected}")]
    ProportionSumInvalid { sum: u32, expected: u32 },

    #[error("no usable price for {asset}")]
    PriceUnavailable { asset: String },

    #[error("swap {from} -> {to} failed: {reason}")]
    SwapFailed {
        from: String,
        to: String,
        reason: String,
    },

    #[error("creation fee transfer failed: {reason}")]
    FeeTransferFailed { reason: String },

    #[error("reentrant call into fund {fund} rejected")]
    ReentrantCall { fund: String },

    #[error("arithmetic overflow in fund accounting")]
    ArithmeticOverflow,

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("export failed: {reason}")]
    ExportFailed { reason: String },
}

impl From<&FundError> for std::process::ExitCode {
    fn from(err: &FundError) -> Self {
        let code: u8 = match err {
            FundError::ExportFailed { .. } => 1,
            FundError::ConfigParse { .. }
            | FundError::ConfigMissing { .. }
            | FundError::ConfigInvalid { .. } => 2,
            FundError::ZeroDeposit
            | FundError::ZeroShareAmount
            | FundError::SharesNotMinted { .. }
            | FundError::InsufficientShares { .. }
            | FundError::Unauthorized { .. }
            | FundError::EmptyAssetList
            | FundError::TooManyAssets { .. }
            | FundError::DuplicateAsset { .. }
            | FundError::UnknownAsset { .. }
            | FundError::NativeUnderlying
            | FundError::ProportionLengthMismatch { .. }
            | FundError::ProportionCoverage { .. }
            | FundError::ProportionSumInvalid { .. } => 3,
            FundError::PriceUnavailable { .. }
            | FundError::SwapFailed { .. }
            | FundError::FeeTransferFailed { .. } => 4,
            FundError::ReentrantCall { .. } | FundError::ArithmeticOverflow => 5,
        };
        std::process::ExitCode::from(code)
    }
}
