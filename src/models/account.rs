//! Bank account model
//!
//! An account owns a non-negative balance that changes only through
//! deposits and withdrawals.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{LedgerError, LedgerResult};

use super::ids::AccountId;
use super::money::Money;

/// A bank account tracked by the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier, immutable once created
    id: AccountId,

    /// Display name
    name: String,

    /// Current balance, never negative
    balance: Money,
}

impl Account {
    /// Create a new account with a fresh identifier
    pub fn new(name: impl Into<String>, initial_balance: Money) -> LedgerResult<Self> {
        Self::from_parts(AccountId::new(), name, initial_balance)
    }

    /// Reconstruct an account with a known identifier, re-validating all fields
    pub fn from_parts(
        id: AccountId,
        name: impl Into<String>,
        balance: Money,
    ) -> LedgerResult<Self> {
        let name = name.into();
        validate_name(&name)?;
        if balance.is_negative() {
            return Err(LedgerError::InvalidInput(
                "account balance must not be negative".into(),
            ));
        }
        Ok(Self { id, name, balance })
    }

    /// Unique identifier
    pub fn id(&self) -> AccountId {
        self.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current balance
    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Increase the balance; the amount must be positive
    pub fn deposit(&mut self, amount: Money) -> LedgerResult<()> {
        if !amount.is_positive() {
            return Err(LedgerError::InvalidInput(
                "deposit amount must be positive".into(),
            ));
        }
        self.balance += amount;
        Ok(())
    }

    /// Decrease the balance; the amount must be positive and covered
    pub fn withdraw(&mut self, amount: Money) -> LedgerResult<()> {
        if !amount.is_positive() {
            return Err(LedgerError::InvalidInput(
                "withdrawal amount must be positive".into(),
            ));
        }
        if amount > self.balance {
            return Err(LedgerError::InsufficientFunds {
                needed: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        Ok(())
    }

    /// Change the display name
    pub fn rename(&mut self, new_name: impl Into<String>) -> LedgerResult<()> {
        let new_name = new_name.into();
        validate_name(&new_name)?;
        self.name = new_name;
        Ok(())
    }
}

fn validate_name(name: &str) -> LedgerResult<()> {
    if name.trim().is_empty() {
        return Err(LedgerError::InvalidInput(
            "account name must not be empty".into(),
        ));
    }
    Ok(())
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.balance)
    }
}
