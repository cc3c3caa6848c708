//! CLI commands
//!
//! Non-interactive subcommands driving the ledger engine contract. Each
//! handler parses its plain-text arguments, calls into the engine and prints
//! the result; typed errors bubble to the binary boundary.

pub mod account;
pub mod category;
pub mod operation;
pub mod report;

pub use account::{handle_account_command, AccountCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use operation::{handle_operation_command, OperationCommands};
pub use report::{handle_report_command, ReportCommands};

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{AccountId, CategoryId, Money, OperationId, OperationKind};

pub(crate) fn parse_money(s: &str) -> LedgerResult<Money> {
    Money::parse(s).map_err(|e| LedgerError::InvalidInput(e.to_string()))
}

pub(crate) fn parse_account_id(s: &str) -> LedgerResult<AccountId> {
    AccountId::parse(s).map_err(|_| LedgerError::InvalidInput(format!("invalid account id: '{s}'")))
}

pub(crate) fn parse_category_id(s: &str) -> LedgerResult<CategoryId> {
    CategoryId::parse(s)
        .map_err(|_| LedgerError::InvalidInput(format!("invalid category id: '{s}'")))
}

pub(crate) fn parse_operation_id(s: &str) -> LedgerResult<OperationId> {
    OperationId::parse(s)
        .map_err(|_| LedgerError::InvalidInput(format!("invalid operation id: '{s}'")))
}

pub(crate) fn parse_kind(s: &str) -> LedgerResult<OperationKind> {
    OperationKind::parse(s).ok_or_else(|| {
        LedgerError::InvalidInput(format!("invalid kind: '{s}'. Use 'income' or 'expense'"))
    })
}

/// Parse a timestamp; a bare date means the start of that day
pub(crate) fn parse_datetime(s: &str) -> LedgerResult<NaiveDateTime> {
    if let Ok(datetime) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Ok(datetime);
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }
    Err(LedgerError::InvalidInput(format!(
        "invalid date: '{s}'. Use YYYY-MM-DD or \"YYYY-MM-DD HH:MM:SS\""
    )))
}

/// Parse a range end; a bare date means the end of that day, keeping
/// date-only ranges inclusive
pub(crate) fn parse_range_end(s: &str) -> LedgerResult<NaiveDateTime> {
    if let Ok(datetime) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Ok(datetime);
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN) + Duration::seconds(86_399));
    }
    Err(LedgerError::InvalidInput(format!(
        "invalid date: '{s}'. Use YYYY-MM-DD or \"YYYY-MM-DD HH:MM:SS\""
    )))
}
