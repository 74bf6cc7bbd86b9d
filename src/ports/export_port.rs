//! Activity-log export port trait.

use std::path::Path;

use crate::domain::error::FundError;
use crate::domain::fund::FundEvent;

/// Port for writing a fund's activity log.
pub trait ExportPort {
    fn write(
        &self,
        fund_name: &str,
        events: &[FundEvent],
        output_path: &Path,
    ) -> Result<(), FundError>;
}
