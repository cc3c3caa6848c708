//! Custom error types for fintrack
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::Money;

/// The main error type for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Validation failure on a constructor or mutator argument
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A referenced identifier has no matching entity
    #[error("{entity} not found: {identifier}")]
    NotFound {
        entity: &'static str,
        identifier: String,
    },

    /// A withdrawal or expense would make the account balance negative
    #[error("Insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: Money, available: Money },

    /// Format string is not one of csv/json/yaml
    #[error("Unsupported format: '{0}'. Use 'csv', 'json' or 'yaml'")]
    UnsupportedFormat(String),

    /// Malformed serialized data during import
    #[error("Parse error in '{fragment}': {reason}")]
    Parse { fragment: String, reason: String },

    /// Filesystem access failure during export/import
    #[error("I/O error: {0}")]
    Io(String),
}

impl LedgerError {
    /// Create a "not found" error for accounts
    pub fn account_not_found(identifier: impl ToString) -> Self {
        Self::NotFound {
            entity: "Account",
            identifier: identifier.to_string(),
        }
    }

    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl ToString) -> Self {
        Self::NotFound {
            entity: "Category",
            identifier: identifier.to_string(),
        }
    }

    /// Create a "not found" error for operations
    pub fn operation_not_found(identifier: impl ToString) -> Self {
        Self::NotFound {
            entity: "Operation",
            identifier: identifier.to_string(),
        }
    }

    /// Create a parse error wrapping the offending fragment and its cause
    pub fn parse(fragment: impl Into<String>, reason: impl ToString) -> Self {
        Self::Parse {
            fragment: fragment.into(),
            reason: reason.to_string(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
