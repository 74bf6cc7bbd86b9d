//! Core domain types and logic.

pub mod asset;
pub mod ledger;
pub mod proportions;
pub mod fund;
pub mod factory;
pub mod config_validation;
pub mod error;
