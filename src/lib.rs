//! fintrack - personal finance ledger with multi-format import/export
//!
//! This library provides the core functionality for the fintrack CLI: an
//! in-memory ledger of bank accounts, categories and income/expense
//! operations, with derived analytics and whole-state serialization to CSV,
//! JSON and YAML.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `error`: Custom error types
//! - `models`: Core data models (accounts, categories, operations)
//! - `ledger`: The consistency engine, analytics and the caching proxy
//! - `codec`: Per-format export and import
//! - `cli`: Subcommand definitions and handlers
//! - `display`: Terminal output formatting

pub mod cli;
pub mod codec;
pub mod display;
pub mod error;
pub mod ledger;
pub mod models;

pub use error::{LedgerError, LedgerResult};
pub use ledger::{cache::CachedLedger, Ledger, LedgerOps};
