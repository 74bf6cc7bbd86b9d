pub mod memory_oracle;
pub mod oracle_router;
pub mod memory_fee_token;
pub mod file_config_adapter;
pub mod csv_export_adapter;
