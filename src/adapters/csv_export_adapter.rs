//! CSV activity-log export adapter.

use std::path::Path;

use crate::domain::error::FundError;
use crate::domain::fund::{FundEvent, FundEventKind};
use crate::ports::export_port::ExportPort;

pub struct CsvExportAdapter;

fn row(fund_name: &str, event: &FundEvent) -> [String; 6] {
    let at = event.at.to_rfc3339();
    match &event.kind {
        FundEventKind::Created => [
            fund_name.to_string(),
            at,
            "created".to_string(),
            String::new(),
            String::new(),
            String::new(),
        ],
        FundEventKind::Deposit {
            holder,
            value_in,
            shares_minted,
        } => [
            fund_name.to_string(),
            at,
            "deposit".to_string(),
            holder.to_string(),
            value_in.to_string(),
            shares_minted.to_string(),
        ],
        FundEventKind::Redemption {
            holder,
            shares_burned,
            payout,
        } => [
            fund_name.to_string(),
            at,
            "redemption".to_string(),
            holder.to_string(),
            payout.to_string(),
            shares_burned.to_string(),
        ],
        FundEventKind::ProportionsUpdated => [
            fund_name.to_string(),
            at,
            "proportions_updated".to_string(),
            String::new(),
            String::new(),
            String::new(),
        ],
        FundEventKind::Rebalanced { swaps } => [
            fund_name.to_string(),
            at,
            "rebalanced".to_string(),
            String::new(),
            swaps.to_string(),
            String::new(),
        ],
    }
}

impl ExportPort for CsvExportAdapter {
    fn write(
        &self,
        fund_name: &str,
        events: &[FundEvent],
        output_path: &Path,
    ) -> Result<(), FundError> {
        let mut writer = csv::Writer::from_path(output_path).map_err(|e| {
            FundError::ExportFailed {
                reason: format!("cannot open {}: {}", output_path.display(), e),
            }
        })?;

        writer
            .write_record(["fund", "at", "event", "account", "value", "shares"])
            .map_err(|e| FundError::ExportFailed {
                reason: e.to_string(),
            })?;

        for event in events {
            writer
                .write_record(row(fund_name, event))
                .map_err(|e| FundError::ExportFailed {
                    reason: e.to_string(),
                })?;
        }

        writer.flush().map_err(|e| FundError::ExportFailed {
            reason: e.to_string(),
        })
    }
}
