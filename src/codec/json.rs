//! JSON codec
//!
//! One pretty-printed document with top-level `Accounts`, `Categories` and
//! `Operations` arrays, serialized structurally both ways.

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};

use super::LedgerDocument;

/// Write a document as pretty-printed JSON
pub fn write_json<W: Write>(writer: &mut W, document: &LedgerDocument) -> LedgerResult<()> {
    serde_json::to_writer_pretty(writer, document).map_err(|e| LedgerError::Io(e.to_string()))
}

/// Parse a JSON document
pub fn parse(content: &str) -> LedgerResult<LedgerDocument> {
    serde_json::from_str(content).map_err(|e| LedgerError::parse(super::snippet(content), e))
}
