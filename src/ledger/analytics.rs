//! Derived analytics over the operation ledger
//!
//! Pure calculations over operation slices; both timestamp range bounds are
//! inclusive.

use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::models::{CategoryId, Money, Operation, OperationKind};

/// Sum of income amounts minus sum of expense amounts within the range
pub fn income_expense_difference(
    operations: &[Operation],
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Money {
    operations
        .iter()
        .filter(|op| in_range(op, start, end))
        .map(|op| match op.kind() {
            OperationKind::Income => op.amount(),
            OperationKind::Expense => -op.amount(),
        })
        .sum()
}

/// Per-category amount totals within the range
///
/// Categories with no operations in range are absent from the result rather
/// than present with a zero total.
pub fn operations_by_category(
    operations: &[Operation],
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> HashMap<CategoryId, Money> {
    let mut totals: HashMap<CategoryId, Money> = HashMap::new();
    for operation in operations.iter().filter(|op| in_range(op, start, end)) {
        *totals
            .entry(operation.category_id())
            .or_insert(Money::zero()) += operation.amount();
    }
    totals
}

fn in_range(operation: &Operation, start: NaiveDateTime, end: NaiveDateTime) -> bool {
    operation.date() >= start && operation.date() <= end
}
