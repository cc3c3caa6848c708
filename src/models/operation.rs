//! Operation model
//!
//! A single recorded income or expense event affecting exactly one account.
//! Operations reference their account and category by identifier; the
//! balance effect itself is applied by the ledger engine.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{LedgerError, LedgerResult};

use super::ids::{AccountId, CategoryId, OperationId};
use super::kind::OperationKind;
use super::money::Money;

/// A recorded income or expense event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Unique identifier, immutable once created
    id: OperationId,

    /// Income/expense classification, immutable after creation
    #[serde(rename = "type")]
    kind: OperationKind,

    /// Owning account; operations are not reassignable to another account
    account_id: AccountId,

    /// Amount, never negative
    amount: Money,

    /// When the operation took place; past and future values are both valid
    date: NaiveDateTime,

    /// Optional free-text description
    #[serde(default)]
    description: Option<String>,

    /// Category this operation belongs to
    category_id: CategoryId,
}

impl Operation {
    /// Create a new operation with a fresh identifier
    pub fn new(
        kind: OperationKind,
        account_id: AccountId,
        amount: Money,
        date: NaiveDateTime,
        description: Option<String>,
        category_id: CategoryId,
    ) -> LedgerResult<Self> {
        Self::from_parts(
            OperationId::new(),
            kind,
            account_id,
            amount,
            date,
            description,
            category_id,
        )
    }

    /// Reconstruct an operation with a known identifier, re-validating all fields
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: OperationId,
        kind: OperationKind,
        account_id: AccountId,
        amount: Money,
        date: NaiveDateTime,
        description: Option<String>,
        category_id: CategoryId,
    ) -> LedgerResult<Self> {
        if account_id.is_nil() {
            return Err(LedgerError::InvalidInput(
                "operation account id must not be nil".into(),
            ));
        }
        validate_amount(amount)?;
        validate_category(category_id)?;
        Ok(Self {
            id,
            kind,
            account_id,
            amount,
            date,
            description,
            category_id,
        })
    }

    /// Unique identifier
    pub fn id(&self) -> OperationId {
        self.id
    }

    /// Income/expense classification
    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    /// Owning account identifier
    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    /// Operation amount
    pub fn amount(&self) -> Money {
        self.amount
    }

    /// Timestamp of the operation
    pub fn date(&self) -> NaiveDateTime {
        self.date
    }

    /// Optional description
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Category identifier
    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    /// Replace the mutable fields of the operation
    ///
    /// Only the record is touched; reconciling the account balance with the
    /// new amount is the ledger engine's job.
    pub fn update(
        &mut self,
        new_amount: Money,
        new_date: NaiveDateTime,
        new_description: Option<String>,
        new_category_id: CategoryId,
    ) -> LedgerResult<()> {
        validate_amount(new_amount)?;
        validate_category(new_category_id)?;

        self.amount = new_amount;
        self.date = new_date;
        self.description = new_description;
        self.category_id = new_category_id;
        Ok(())
    }
}

fn validate_amount(amount: Money) -> LedgerResult<()> {
    if amount.is_negative() {
        return Err(LedgerError::InvalidInput(
            "operation amount must not be negative".into(),
        ));
    }
    Ok(())
}

fn validate_category(category_id: CategoryId) -> LedgerResult<()> {
    if category_id.is_nil() {
        return Err(LedgerError::InvalidInput(
            "operation category id must not be nil".into(),
        ));
    }
    Ok(())
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d %H:%M:%S"),
            self.kind,
            self.amount
        )
    }
}
