//! Terminal output formatting
//!
//! Formats entity listings and report results for the CLI. Identifier
//! columns print the full identifier where commands need it back (edit,
//! remove) and the short form where a row only references another entity.

use std::collections::HashMap;

use crate::models::{Account, Category, CategoryId, Money, Operation};

/// Format a list of accounts as a table
pub fn format_account_list(accounts: &[Account]) -> String {
    if accounts.is_empty() {
        return "No accounts found.\n".to_string();
    }

    let name_width = column_width(accounts.iter().map(|a| a.name().len()), "Name".len());

    let mut output = String::new();
    output.push_str(&format!(
        "{:<36}  {:<name_width$}  {:>14}\n",
        "Id", "Name", "Balance"
    ));
    output.push_str(&format!(
        "{:-<36}  {:-<name_width$}  {:->14}\n",
        "", "", ""
    ));
    for account in accounts {
        output.push_str(&format!(
            "{:<36}  {:<name_width$}  {:>14}\n",
            account.id().to_string(),
            account.name(),
            account.balance().to_string(),
        ));
    }
    output
}

/// Format a list of categories as a table
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n".to_string();
    }

    let name_width = column_width(categories.iter().map(|c| c.name().len()), "Name".len());

    let mut output = String::new();
    output.push_str(&format!(
        "{:<36}  {:<7}  {:<name_width$}\n",
        "Id", "Type", "Name"
    ));
    output.push_str(&format!("{:-<36}  {:-<7}  {:-<name_width$}\n", "", "", ""));
    for category in categories {
        output.push_str(&format!(
            "{:<36}  {:<7}  {:<name_width$}\n",
            category.id().to_string(),
            category.kind().to_string(),
            category.name(),
        ));
    }
    output
}

/// Format a list of operations as a table
pub fn format_operation_list(operations: &[Operation]) -> String {
    if operations.is_empty() {
        return "No operations found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<36}  {:<7}  {:<8}  {:>14}  {:<19}  {:<8}  {}\n",
        "Id", "Type", "Account", "Amount", "Date", "Category", "Description"
    ));
    output.push_str(&format!(
        "{:-<36}  {:-<7}  {:-<8}  {:->14}  {:-<19}  {:-<8}  {:-<11}\n",
        "", "", "", "", "", "", ""
    ));
    for operation in operations {
        output.push_str(&format!(
            "{:<36}  {:<7}  {:<8}  {:>14}  {:<19}  {:<8}  {}\n",
            operation.id().to_string(),
            operation.kind().to_string(),
            operation.account_id().short(),
            operation.amount().to_string(),
            operation.date().format("%Y-%m-%d %H:%M:%S").to_string(),
            operation.category_id().short(),
            operation.description().unwrap_or(""),
        ));
    }
    output
}

/// Format per-category totals, resolving names where the category still exists
pub fn format_category_totals(
    totals: &HashMap<CategoryId, Money>,
    categories: &[Category],
) -> String {
    if totals.is_empty() {
        return "No operations in the given period.\n".to_string();
    }

    let mut rows: Vec<(String, Money)> = totals
        .iter()
        .map(|(id, total)| {
            let label = categories
                .iter()
                .find(|c| c.id() == *id)
                .map(|c| c.name().to_string())
                .unwrap_or_else(|| id.to_string());
            (label, *total)
        })
        .collect();
    rows.sort_by(|a, b| a.0.cmp(&b.0));

    let name_width = column_width(rows.iter().map(|(label, _)| label.len()), "Category".len());

    let mut output = String::new();
    output.push_str(&format!("{:<name_width$}  {:>14}\n", "Category", "Total"));
    output.push_str(&format!("{:-<name_width$}  {:->14}\n", "", ""));
    for (label, total) in rows {
        output.push_str(&format!(
            "{:<name_width$}  {:>14}\n",
            label,
            total.to_string()
        ));
    }
    output
}

fn column_width(lengths: impl Iterator<Item = usize>, minimum: usize) -> usize {
    lengths.max().unwrap_or(minimum).max(minimum)
}
