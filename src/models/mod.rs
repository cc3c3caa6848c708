//! Core data models
//!
//! Self-validating entity types for the ledger: accounts, categories and
//! operations, plus the money and identifier primitives they share.

pub mod account;
pub mod category;
pub mod ids;
pub mod kind;
pub mod money;
pub mod operation;

pub use account::Account;
pub use category::Category;
pub use ids::{AccountId, CategoryId, OperationId};
pub use kind::OperationKind;
pub use money::Money;
pub use operation::Operation;
