pub mod price_oracle;
pub mod swap_router;
pub mod fee_token;
pub mod config_port;
pub mod export_port;
