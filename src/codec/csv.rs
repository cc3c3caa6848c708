//! CSV codec
//!
//! Exports the three entity tables with the ledger's home-locale convention:
//! monetary values use a comma decimal separator to two fixed places and are
//! written unquoted, so a balance of 1300 units appears as `1300,00` even
//! when the delimiter is itself a comma. The importer compensates by
//! re-joining a split field pair whose join forms such a number.

use std::io::Write;

use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Account, AccountId, Category, CategoryId, Money, Operation, OperationId, OperationKind,
};

use super::LedgerDocument;

/// Timestamp format used in operations.csv
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Write the accounts table
pub fn write_accounts<W: Write>(
    writer: &mut W,
    accounts: &[Account],
    delimiter: char,
) -> LedgerResult<()> {
    writeln!(writer, "Id{d}Name{d}Balance", d = delimiter)?;
    for account in accounts {
        writeln!(
            writer,
            "{}{d}{}{d}{}",
            account.id(),
            escape_csv(account.name(), delimiter),
            account.balance().format_comma(),
            d = delimiter
        )?;
    }
    Ok(())
}

/// Write the categories table
pub fn write_categories<W: Write>(
    writer: &mut W,
    categories: &[Category],
    delimiter: char,
) -> LedgerResult<()> {
    writeln!(writer, "Id{d}Type{d}Name", d = delimiter)?;
    for category in categories {
        writeln!(
            writer,
            "{}{d}{}{d}{}",
            category.id(),
            category.kind(),
            escape_csv(category.name(), delimiter),
            d = delimiter
        )?;
    }
    Ok(())
}

/// Write the operations table
pub fn write_operations<W: Write>(
    writer: &mut W,
    operations: &[Operation],
    delimiter: char,
) -> LedgerResult<()> {
    writeln!(
        writer,
        "Id{d}Type{d}BankAccountId{d}Amount{d}Date{d}Description{d}CategoryId",
        d = delimiter
    )?;
    for operation in operations {
        writeln!(
            writer,
            "{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}",
            operation.id(),
            operation.kind(),
            operation.account_id(),
            operation.amount().format_comma(),
            operation.date().format(DATE_FORMAT),
            escape_csv(operation.description().unwrap_or(""), delimiter),
            operation.category_id(),
            d = delimiter
        )?;
    }
    Ok(())
}

/// Parse one CSV table into a document
///
/// The first record is a header and is skipped. Row shape is inferred from
/// the field count: three fields with a numeric third are an account, three
/// fields with a kind tag second are a category, seven or more fields are an
/// operation. Lines matching none of these are silently dropped; a matching
/// row that fails field parsing fails the whole import.
pub fn parse(content: &str, delimiter: char) -> LedgerResult<LedgerDocument> {
    let mut document = LedgerDocument::default();
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter as u8)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    for (index, record) in reader.records().enumerate() {
        let record: StringRecord =
            record.map_err(|e| LedgerError::parse(super::snippet(content), e))?;
        if index == 0 {
            continue;
        }

        let cells = rejoin_amounts(record.iter().map(str::to_string).collect());
        if cells.is_empty() {
            continue;
        }
        let line = cells.join(&delimiter.to_string());

        if cells.len() == 3 && Money::parse(&cells[2]).is_ok() {
            let account = parse_account(&cells).map_err(|e| LedgerError::parse(line.as_str(), e))?;
            document.accounts.push(account);
        } else if cells.len() == 3 && OperationKind::parse(&cells[1]).is_some() {
            let category = parse_category(&cells).map_err(|e| LedgerError::parse(line.as_str(), e))?;
            document.categories.push(category);
        } else if cells.len() >= 7 {
            let operation = parse_operation(&cells).map_err(|e| LedgerError::parse(line.as_str(), e))?;
            document.operations.push(operation);
        }
    }

    Ok(document)
}

fn parse_account(cells: &[String]) -> Result<Account, String> {
    let id = AccountId::parse(&cells[0]).map_err(|e| e.to_string())?;
    let balance = Money::parse(&cells[2]).map_err(|e| e.to_string())?;
    Account::from_parts(id, cells[1].clone(), balance).map_err(|e| e.to_string())
}

fn parse_category(cells: &[String]) -> Result<Category, String> {
    let id = CategoryId::parse(&cells[0]).map_err(|e| e.to_string())?;
    let kind = OperationKind::parse(&cells[1]).ok_or("invalid kind tag")?;
    Category::from_parts(id, kind, cells[2].clone()).map_err(|e| e.to_string())
}

fn parse_operation(cells: &[String]) -> Result<Operation, String> {
    let id = OperationId::parse(&cells[0]).map_err(|e| e.to_string())?;
    let kind = OperationKind::parse(&cells[1]).ok_or("invalid kind tag")?;
    let account_id = AccountId::parse(&cells[2]).map_err(|e| e.to_string())?;
    let amount = Money::parse(&cells[3]).map_err(|e| e.to_string())?;
    let date = NaiveDateTime::parse_from_str(&cells[4], DATE_FORMAT).map_err(|e| e.to_string())?;
    let description = if cells[5].is_empty() {
        None
    } else {
        Some(cells[5].clone())
    };
    let category_id = CategoryId::parse(&cells[6]).map_err(|e| e.to_string())?;
    Operation::from_parts(id, kind, account_id, amount, date, description, category_id)
        .map_err(|e| e.to_string())
}

/// Merge field pairs that are two halves of a comma-decimal number
///
/// An unquoted `500,00` splits into `500` and `00` when the delimiter is a
/// comma; the pair is rejected from the raw split and re-joined here.
fn rejoin_amounts(cells: Vec<String>) -> Vec<String> {
    let mut joined = Vec::with_capacity(cells.len());
    let mut i = 0;
    while i < cells.len() {
        if i + 1 < cells.len() && is_split_amount(&cells[i], &cells[i + 1]) {
            joined.push(format!("{},{}", cells[i], cells[i + 1]));
            i += 2;
        } else {
            joined.push(cells[i].clone());
            i += 1;
        }
    }
    joined
}

fn is_split_amount(left: &str, right: &str) -> bool {
    let units = left.strip_prefix('-').unwrap_or(left);
    !units.is_empty()
        && units.bytes().all(|b| b.is_ascii_digit())
        && right.len() == 2
        && right.bytes().all(|b| b.is_ascii_digit())
}

/// Quote a free-text field when it would break the table shape
fn escape_csv(s: &str, delimiter: char) -> String {
    if s.contains(delimiter) || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
