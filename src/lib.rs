//! etherindex, an on-ledger index-fund engine.
//!
//! Hexagonal architecture: fund accounting and execution logic in [`domain`],
//! capability traits in [`ports`], concrete implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
