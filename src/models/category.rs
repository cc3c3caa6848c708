//! Category model
//!
//! Categories classify operations as income or expense and carry a
//! display name.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{LedgerError, LedgerResult};

use super::ids::CategoryId;
use super::kind::OperationKind;

/// An income or expense category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier, immutable once created
    id: CategoryId,

    /// Income/expense classification
    #[serde(rename = "type")]
    kind: OperationKind,

    /// Display name
    name: String,
}

impl Category {
    /// Create a new category with a fresh identifier
    pub fn new(kind: OperationKind, name: impl Into<String>) -> LedgerResult<Self> {
        Self::from_parts(CategoryId::new(), kind, name)
    }

    /// Reconstruct a category with a known identifier, re-validating all fields
    pub fn from_parts(
        id: CategoryId,
        kind: OperationKind,
        name: impl Into<String>,
    ) -> LedgerResult<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self { id, kind, name })
    }

    /// Unique identifier
    pub fn id(&self) -> CategoryId {
        self.id
    }

    /// Income/expense classification
    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Change the display name
    pub fn rename(&mut self, new_name: impl Into<String>) -> LedgerResult<()> {
        let new_name = new_name.into();
        validate_name(&new_name)?;
        self.name = new_name;
        Ok(())
    }

    /// Change the classification
    pub fn set_kind(&mut self, new_kind: OperationKind) {
        self.kind = new_kind;
    }
}

fn validate_name(name: &str) -> LedgerResult<()> {
    if name.trim().is_empty() {
        return Err(LedgerError::InvalidInput(
            "category name must not be empty".into(),
        ));
    }
    Ok(())
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}
