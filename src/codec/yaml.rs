//! YAML codec
//!
//! Export shares the JSON document shape rendered as block-style YAML.
//! Import deliberately goes through a generic value tree instead of
//! structural deserialization: the three entity arrays are looked up by key
//! and every scalar field is converted by name, so a malformed document
//! reports which piece was wrong rather than a serde type mismatch.

use std::io::Write;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde_yaml::{Mapping, Value};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Account, AccountId, Category, CategoryId, Money, Operation, OperationId, OperationKind,
};

use super::LedgerDocument;

/// Write a document as block-style YAML
pub fn write_yaml<W: Write>(writer: &mut W, document: &LedgerDocument) -> LedgerResult<()> {
    serde_yaml::to_writer(writer, document).map_err(|e| LedgerError::Io(e.to_string()))
}

/// Parse a YAML document by walking a generic value tree
///
/// Absent top-level keys yield empty collections; a document that is not a
/// mapping, a non-mapping list item, or a missing per-item field is a parse
/// error.
pub fn parse(content: &str) -> LedgerResult<LedgerDocument> {
    let root: Value =
        serde_yaml::from_str(content).map_err(|e| LedgerError::parse(super::snippet(content), e))?;
    let root = root.as_mapping().ok_or_else(|| {
        LedgerError::parse(super::snippet(content), "expected a mapping at the document root")
    })?;

    let mut document = LedgerDocument::default();
    for item in items(root, "Accounts")? {
        document.accounts.push(parse_account(item)?);
    }
    for item in items(root, "Categories")? {
        document.categories.push(parse_category(item)?);
    }
    for item in items(root, "Operations")? {
        document.operations.push(parse_operation(item)?);
    }
    Ok(document)
}

/// Key lookup by string; YAML mapping keys are full values
fn lookup<'a>(mapping: &'a Mapping, key: &str) -> Option<&'a Value> {
    mapping.get(&Value::String(key.to_string()))
}

/// Look up a top-level sequence of mappings; an absent key is an empty list
fn items<'a>(root: &'a Mapping, key: &str) -> LedgerResult<Vec<&'a Mapping>> {
    let Some(value) = lookup(root, key) else {
        return Ok(Vec::new());
    };
    let sequence = value
        .as_sequence()
        .ok_or_else(|| LedgerError::parse(key, "expected a sequence"))?;
    sequence
        .iter()
        .map(|item| {
            item.as_mapping()
                .ok_or_else(|| LedgerError::parse(key, "expected a sequence of mappings"))
        })
        .collect()
}

fn parse_account(item: &Mapping) -> LedgerResult<Account> {
    let id = AccountId::from_uuid(uuid_field(item, "id")?);
    let name = str_field(item, "name")?;
    let balance = money_field(item, "balance")?;
    Account::from_parts(id, name, balance)
}

fn parse_category(item: &Mapping) -> LedgerResult<Category> {
    let id = CategoryId::from_uuid(uuid_field(item, "id")?);
    let kind = kind_field(item)?;
    let name = str_field(item, "name")?;
    Category::from_parts(id, kind, name)
}

fn parse_operation(item: &Mapping) -> LedgerResult<Operation> {
    let id = OperationId::from_uuid(uuid_field(item, "id")?);
    let kind = kind_field(item)?;
    let account_id = AccountId::from_uuid(uuid_field(item, "account_id")?);
    let amount = money_field(item, "amount")?;
    let date_str = str_field(item, "date")?;
    let date = NaiveDateTime::from_str(&date_str)
        .map_err(|e| LedgerError::parse(date_str.clone(), e))?;
    let description = match lookup(item, "description") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => return Err(LedgerError::parse("description", "expected a string or null")),
    };
    let category_id = CategoryId::from_uuid(uuid_field(item, "category_id")?);
    Operation::from_parts(id, kind, account_id, amount, date, description, category_id)
}

fn str_field(item: &Mapping, key: &str) -> LedgerResult<String> {
    match lookup(item, key) {
        Some(Value::String(s)) => Ok(s.clone()),
        // A bare scalar like an unquoted numeric name still converts
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        _ => Err(LedgerError::parse(key, "missing or non-scalar field")),
    }
}

fn uuid_field(item: &Mapping, key: &str) -> LedgerResult<uuid::Uuid> {
    let raw = str_field(item, key)?;
    uuid::Uuid::parse_str(&raw).map_err(|e| LedgerError::parse(raw, e))
}

fn money_field(item: &Mapping, key: &str) -> LedgerResult<Money> {
    lookup(item, key)
        .and_then(Value::as_i64)
        .map(Money::from_cents)
        .ok_or_else(|| LedgerError::parse(key, "missing or non-integer field"))
}

fn kind_field(item: &Mapping) -> LedgerResult<OperationKind> {
    let raw = str_field(item, "type")?;
    OperationKind::parse(&raw).ok_or_else(|| LedgerError::parse(raw, "invalid kind tag"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_document() -> LedgerDocument {
        let account = Account::new("Checking", Money::from_cents(130000)).unwrap();
        let category = Category::new(OperationKind::Expense, "Food").unwrap();
        let operation = Operation::new(
            OperationKind::Expense,
            account.id(),
            Money::from_cents(50000),
            NaiveDate::from_ymd_opt(2025, 3, 10)
                .unwrap()
                .and_hms_opt(14, 45, 30)
                .unwrap(),
            Some("Groceries".into()),
            category.id(),
        )
        .unwrap();

        LedgerDocument {
            accounts: vec![account],
            categories: vec![category],
            operations: vec![operation],
        }
    }

    #[test]
    fn test_export_shape() {
        let mut out = Vec::new();
        write_yaml(&mut out, &sample_document()).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Accounts:"));
        assert!(text.contains("Categories:"));
        assert!(text.contains("Operations:"));
        assert!(text.contains("name: Checking"));
    }

    #[test]
    fn test_roundtrip() {
        let document = sample_document();
        let mut out = Vec::new();
        write_yaml(&mut out, &document).unwrap();

        let parsed = parse(&String::from_utf8(out).unwrap()).unwrap();
        assert_eq!(parsed, document);
    }

    #[test]
    fn test_missing_top_level_keys_are_empty() {
        let parsed = parse("Accounts: []\n").unwrap();
        assert!(parsed.accounts.is_empty());
        assert!(parsed.categories.is_empty());
        assert!(parsed.operations.is_empty());
    }

    #[test]
    fn test_non_mapping_root_fails() {
        let err = parse("- just\n- a\n- list\n").unwrap_err();
        assert!(matches!(err, LedgerError::Parse { .. }));
    }

    #[test]
    fn test_missing_item_field_fails() {
        let account_without_balance = "Accounts:\n- id: 550e8400-e29b-41d4-a716-446655440000\n  name: Checking\n";
        let err = parse(account_without_balance).unwrap_err();
        match err {
            LedgerError::Parse { fragment, .. } => assert_eq!(fragment, "balance"),
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
