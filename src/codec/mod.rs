//! Multi-format codec layer
//!
//! Serializes and deserializes whole-ledger state in three formats:
//! - CSV: three tabular files (accounts, categories, operations) with the
//!   ledger's home-locale comma-decimal money convention
//! - JSON: one pretty-printed document
//! - YAML: one block-style document with the same structural shape
//!
//! All filesystem access of the crate happens here.

pub mod csv;
pub mod json;
pub mod yaml;

use std::fmt;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Account, Category, Operation};

/// Serialization format for import and export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Json,
    Yaml,
}

impl FromStr for Format {
    type Err = LedgerError;

    /// Parse a format name, case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            _ => Err(LedgerError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

/// Default CSV delimiter
pub const DEFAULT_DELIMITER: char = ',';

/// Intermediate structure holding a whole ledger's entities
///
/// Built from the engine on export; produced by the per-format parsers on
/// import and then applied back through the engine's add operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerDocument {
    #[serde(rename = "Accounts", default)]
    pub accounts: Vec<Account>,

    #[serde(rename = "Categories", default)]
    pub categories: Vec<Category>,

    #[serde(rename = "Operations", default)]
    pub operations: Vec<Operation>,
}

impl LedgerDocument {
    /// Append another document's entities, preserving order
    pub fn merge(&mut self, other: LedgerDocument) {
        self.accounts.extend(other.accounts);
        self.categories.extend(other.categories);
        self.operations.extend(other.operations);
    }
}

/// Write a document to disk in the given format
///
/// CSV writes `accounts.csv`, `categories.csv` and `operations.csv` into the
/// directory at `path` (created if missing); JSON and YAML write a single
/// file at `path`.
pub fn write_document(document: &LedgerDocument, format: Format, path: &Path) -> LedgerResult<()> {
    match format {
        Format::Csv => {
            fs::create_dir_all(path)?;
            write_file(&path.join("accounts.csv"), |w| {
                csv::write_accounts(w, &document.accounts, DEFAULT_DELIMITER)
            })?;
            write_file(&path.join("categories.csv"), |w| {
                csv::write_categories(w, &document.categories, DEFAULT_DELIMITER)
            })?;
            write_file(&path.join("operations.csv"), |w| {
                csv::write_operations(w, &document.operations, DEFAULT_DELIMITER)
            })?;
        }
        Format::Json => write_file(path, |w| json::write_json(w, document))?,
        Format::Yaml => write_file(path, |w| yaml::write_yaml(w, document))?,
    }
    Ok(())
}

/// Read a document from disk in the given format
///
/// CSV expects the three files inside the directory at `path`, read in
/// accounts/categories/operations order; JSON and YAML read one file.
pub fn read_document(format: Format, path: &Path) -> LedgerResult<LedgerDocument> {
    match format {
        Format::Csv => {
            let mut document = LedgerDocument::default();
            for name in ["accounts.csv", "categories.csv", "operations.csv"] {
                let content = fs::read_to_string(path.join(name))?;
                document.merge(csv::parse(&content, DEFAULT_DELIMITER)?);
            }
            Ok(document)
        }
        Format::Json => json::parse(&fs::read_to_string(path)?),
        Format::Yaml => yaml::parse(&fs::read_to_string(path)?),
    }
}

fn write_file(
    path: &Path,
    write: impl FnOnce(&mut BufWriter<fs::File>) -> LedgerResult<()>,
) -> LedgerResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut writer = BufWriter::new(fs::File::create(path)?);
    write(&mut writer)?;
    writer.flush()?;
    Ok(())
}

/// First line of a payload, truncated, for parse-error fragments
pub(crate) fn snippet(content: &str) -> String {
    let line = content.lines().next().unwrap_or("");
    if line.chars().count() > 60 {
        let truncated: String = line.chars().take(60).collect();
        format!("{}…", truncated)
    } else {
        line.to_string()
    }
}
