//! Ledger engine
//!
//! The facade holding the three ordered entity collections and enforcing the
//! cross-entity invariants on every mutation: account balances always equal
//! the net effect of the recorded operations applied to their starting
//! balances, and every operation enters the ledger through the same
//! balance-checking gate.

pub mod analytics;
pub mod cache;

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDateTime;

use crate::codec::{self, Format, LedgerDocument};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Account, AccountId, Category, CategoryId, Money, Operation, OperationId, OperationKind,
};

/// Capability interface describing the ledger operation set
///
/// Implemented by [`Ledger`] itself and by the caching proxy wrapping it,
/// so callers can be written against either.
pub trait LedgerOps {
    /// Add an account to the ledger
    fn add_account(&mut self, account: Account);

    /// Remove an account; referencing operations are left untouched
    fn remove_account(&mut self, id: AccountId) -> LedgerResult<()>;

    /// Change an account's display name
    fn edit_account(&mut self, id: AccountId, new_name: &str) -> LedgerResult<()>;

    /// Add a category to the ledger
    fn add_category(&mut self, category: Category);

    /// Remove a category; referencing operations are left untouched
    fn remove_category(&mut self, id: CategoryId) -> LedgerResult<()>;

    /// Change a category's name and kind
    fn edit_category(
        &mut self,
        id: CategoryId,
        new_name: &str,
        new_kind: OperationKind,
    ) -> LedgerResult<()>;

    /// Record an operation, applying its effect to the owning account
    fn add_operation(&mut self, operation: Operation) -> LedgerResult<()>;

    /// Remove an operation record without reversing its balance effect
    fn remove_operation(&mut self, id: OperationId) -> LedgerResult<()>;

    /// Edit an operation, rolling back the old amount and reapplying the new
    fn edit_operation(
        &mut self,
        id: OperationId,
        new_amount: Money,
        new_date: NaiveDateTime,
        new_description: Option<String>,
        new_category_id: CategoryId,
    ) -> LedgerResult<()>;

    /// All accounts in insertion order
    fn accounts(&self) -> Vec<Account>;

    /// All categories in insertion order
    fn categories(&self) -> Vec<Category>;

    /// All operations in insertion order
    fn operations(&self) -> Vec<Operation>;

    /// Income minus expenses over an inclusive timestamp range
    fn income_expense_difference(&self, start: NaiveDateTime, end: NaiveDateTime) -> Money;

    /// Per-category operation totals over an inclusive timestamp range
    fn operations_by_category(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> HashMap<CategoryId, Money>;

    /// Export the whole ledger; format is csv/json/yaml, case-insensitive
    fn export_data(&self, format: &str, path: &Path) -> LedgerResult<()>;

    /// Import serialized data, re-validating every entity on the way in
    fn import_data(&mut self, format: &str, path: &Path) -> LedgerResult<()>;
}

/// The in-memory ledger engine
#[derive(Debug, Default)]
pub struct Ledger {
    accounts: Vec<Account>,
    categories: Vec<Category>,
    operations: Vec<Operation>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a parsed document through the regular add operations
    ///
    /// Accounts arrive carrying their exported balances, which already
    /// include the effects of the document's operations; each balance is
    /// rewound by that net effect first so the replay through
    /// `add_operation` reconstructs the exported state exactly.
    fn apply_document(&mut self, document: LedgerDocument) -> LedgerResult<()> {
        let mut net: HashMap<AccountId, Money> = HashMap::new();
        for operation in &document.operations {
            let delta = match operation.kind() {
                OperationKind::Income => operation.amount(),
                OperationKind::Expense => -operation.amount(),
            };
            *net.entry(operation.account_id()).or_insert(Money::zero()) += delta;
        }

        for account in document.accounts {
            let rewound =
                account.balance() - net.get(&account.id()).copied().unwrap_or(Money::zero());
            self.add_account(Account::from_parts(account.id(), account.name(), rewound)?);
        }
        for category in document.categories {
            self.add_category(Category::from_parts(
                category.id(),
                category.kind(),
                category.name(),
            )?);
        }
        for operation in document.operations {
            let operation = Operation::from_parts(
                operation.id(),
                operation.kind(),
                operation.account_id(),
                operation.amount(),
                operation.date(),
                operation.description().map(String::from),
                operation.category_id(),
            )?;
            self.add_operation(operation)?;
        }
        Ok(())
    }

    fn to_document(&self) -> LedgerDocument {
        LedgerDocument {
            accounts: self.accounts.clone(),
            categories: self.categories.clone(),
            operations: self.operations.clone(),
        }
    }
}

impl LedgerOps for Ledger {
    fn add_account(&mut self, account: Account) {
        self.accounts.push(account);
    }

    fn remove_account(&mut self, id: AccountId) -> LedgerResult<()> {
        let index = self
            .accounts
            .iter()
            .position(|a| a.id() == id)
            .ok_or_else(|| LedgerError::account_not_found(id))?;
        self.accounts.remove(index);
        Ok(())
    }

    fn edit_account(&mut self, id: AccountId, new_name: &str) -> LedgerResult<()> {
        let account = self
            .accounts
            .iter_mut()
            .find(|a| a.id() == id)
            .ok_or_else(|| LedgerError::account_not_found(id))?;
        account.rename(new_name)
    }

    fn add_category(&mut self, category: Category) {
        self.categories.push(category);
    }

    fn remove_category(&mut self, id: CategoryId) -> LedgerResult<()> {
        let index = self
            .categories
            .iter()
            .position(|c| c.id() == id)
            .ok_or_else(|| LedgerError::category_not_found(id))?;
        self.categories.remove(index);
        Ok(())
    }

    fn edit_category(
        &mut self,
        id: CategoryId,
        new_name: &str,
        new_kind: OperationKind,
    ) -> LedgerResult<()> {
        let category = self
            .categories
            .iter_mut()
            .find(|c| c.id() == id)
            .ok_or_else(|| LedgerError::category_not_found(id))?;
        category.rename(new_name)?;
        category.set_kind(new_kind);
        Ok(())
    }

    fn add_operation(&mut self, operation: Operation) -> LedgerResult<()> {
        let account = self
            .accounts
            .iter_mut()
            .find(|a| a.id() == operation.account_id())
            .ok_or_else(|| LedgerError::account_not_found(operation.account_id()))?;

        match operation.kind() {
            OperationKind::Income => account.deposit(operation.amount())?,
            OperationKind::Expense => account.withdraw(operation.amount())?,
        }
        self.operations.push(operation);
        Ok(())
    }

    fn remove_operation(&mut self, id: OperationId) -> LedgerResult<()> {
        let index = self
            .operations
            .iter()
            .position(|o| o.id() == id)
            .ok_or_else(|| LedgerError::operation_not_found(id))?;
        self.operations.remove(index);
        Ok(())
    }

    fn edit_operation(
        &mut self,
        id: OperationId,
        new_amount: Money,
        new_date: NaiveDateTime,
        new_description: Option<String>,
        new_category_id: CategoryId,
    ) -> LedgerResult<()> {
        let operation = self
            .operations
            .iter_mut()
            .find(|o| o.id() == id)
            .ok_or_else(|| LedgerError::operation_not_found(id))?;
        let account = self
            .accounts
            .iter_mut()
            .find(|a| a.id() == operation.account_id())
            .ok_or_else(|| LedgerError::account_not_found(operation.account_id()))?;

        if new_amount.is_negative() {
            return Err(LedgerError::InvalidInput(
                "operation amount must not be negative".into(),
            ));
        }

        // Roll back the old amount's effect
        match operation.kind() {
            OperationKind::Income => account.withdraw(operation.amount())?,
            OperationKind::Expense => account.deposit(operation.amount())?,
        }

        operation.update(new_amount, new_date, new_description, new_category_id)?;

        // Reapply with the new amount. An uncovered expense fails here,
        // leaving the balance rolled back and the record already updated.
        match operation.kind() {
            OperationKind::Income => account.deposit(new_amount)?,
            OperationKind::Expense => account.withdraw(new_amount)?,
        }
        Ok(())
    }

    fn accounts(&self) -> Vec<Account> {
        self.accounts.clone()
    }

    fn categories(&self) -> Vec<Category> {
        self.categories.clone()
    }

    fn operations(&self) -> Vec<Operation> {
        self.operations.clone()
    }

    fn income_expense_difference(&self, start: NaiveDateTime, end: NaiveDateTime) -> Money {
        analytics::income_expense_difference(&self.operations, start, end)
    }

    fn operations_by_category(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> HashMap<CategoryId, Money> {
        analytics::operations_by_category(&self.operations, start, end)
    }

    fn export_data(&self, format: &str, path: &Path) -> LedgerResult<()> {
        let format: Format = format.parse()?;
        codec::write_document(&self.to_document(), format, path)
    }

    fn import_data(&mut self, format: &str, path: &Path) -> LedgerResult<()> {
        let format: Format = format.parse()?;
        let document = codec::read_document(format, path)?;
        self.apply_document(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn ledger_with_account(balance_cents: i64) -> (Ledger, AccountId, CategoryId) {
        let mut ledger = Ledger::new();
        let account = Account::new("Checking", Money::from_cents(balance_cents)).unwrap();
        let account_id = account.id();
        ledger.add_account(account);

        let category = Category::new(OperationKind::Expense, "Food").unwrap();
        let category_id = category.id();
        ledger.add_category(category);

        (ledger, account_id, category_id)
    }

    fn balance_of(ledger: &Ledger, id: AccountId) -> Money {
        ledger
            .accounts()
            .into_iter()
            .find(|a| a.id() == id)
            .unwrap()
            .balance()
    }

    #[test]
    fn test_add_and_list_accounts_preserves_order() {
        let mut ledger = Ledger::new();
        let first = Account::new("First", Money::zero()).unwrap();
        let second = Account::new("Second", Money::zero()).unwrap();
        ledger.add_account(first.clone());
        ledger.add_account(second.clone());

        let listed = ledger.accounts();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id(), first.id());
        assert_eq!(listed[1].id(), second.id());
    }

    #[test]
    fn test_remove_account_not_found() {
        let mut ledger = Ledger::new();
        let err = ledger.remove_account(AccountId::new()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_edit_account_renames() {
        let (mut ledger, account_id, _) = ledger_with_account(0);
        ledger.edit_account(account_id, "Joint").unwrap();
        assert_eq!(ledger.accounts()[0].name(), "Joint");

        let err = ledger.edit_account(account_id, "  ").unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_edit_category() {
        let (mut ledger, _, category_id) = ledger_with_account(0);
        ledger
            .edit_category(category_id, "Eating out", OperationKind::Income)
            .unwrap();
        let category = &ledger.categories()[0];
        assert_eq!(category.name(), "Eating out");
        assert_eq!(category.kind(), OperationKind::Income);
    }

    #[test]
    fn test_add_income_operation_deposits() {
        let (mut ledger, account_id, category_id) = ledger_with_account(10000);
        let op = Operation::new(
            OperationKind::Income,
            account_id,
            Money::from_cents(5000),
            date(1),
            None,
            category_id,
        )
        .unwrap();
        ledger.add_operation(op).unwrap();

        assert_eq!(balance_of(&ledger, account_id), Money::from_cents(15000));
        assert_eq!(ledger.operations().len(), 1);
    }

    #[test]
    fn test_add_expense_operation_withdraws() {
        let (mut ledger, account_id, category_id) = ledger_with_account(10000);
        let op = Operation::new(
            OperationKind::Expense,
            account_id,
            Money::from_cents(4000),
            date(1),
            None,
            category_id,
        )
        .unwrap();
        ledger.add_operation(op).unwrap();

        assert_eq!(balance_of(&ledger, account_id), Money::from_cents(6000));
    }

    #[test]
    fn test_add_expense_exceeding_balance_rejected_without_effect() {
        let (mut ledger, account_id, category_id) = ledger_with_account(10000);
        let op = Operation::new(
            OperationKind::Expense,
            account_id,
            Money::from_cents(15000),
            date(1),
            None,
            category_id,
        )
        .unwrap();

        let err = ledger.add_operation(op).unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientFunds { .. }));
        assert_eq!(balance_of(&ledger, account_id), Money::from_cents(10000));
        assert!(ledger.operations().is_empty());
    }

    #[test]
    fn test_add_operation_unknown_account_rejected() {
        let (mut ledger, _, category_id) = ledger_with_account(10000);
        let op = Operation::new(
            OperationKind::Income,
            AccountId::new(),
            Money::from_cents(100),
            date(1),
            None,
            category_id,
        )
        .unwrap();

        let err = ledger.add_operation(op).unwrap_err();
        assert!(err.is_not_found());
        assert!(ledger.operations().is_empty());
    }

    #[test]
    fn test_edit_operation_adjusts_balance() {
        // Expense edited from A to A' on balance B leaves B + A - A'
        let (mut ledger, account_id, category_id) = ledger_with_account(10000);
        let op = Operation::new(
            OperationKind::Expense,
            account_id,
            Money::from_cents(4000),
            date(1),
            None,
            category_id,
        )
        .unwrap();
        let op_id = op.id();
        ledger.add_operation(op).unwrap();
        assert_eq!(balance_of(&ledger, account_id), Money::from_cents(6000));

        ledger
            .edit_operation(
                op_id,
                Money::from_cents(2500),
                date(2),
                Some("smaller".into()),
                category_id,
            )
            .unwrap();

        assert_eq!(balance_of(&ledger, account_id), Money::from_cents(7500));
        let edited = &ledger.operations()[0];
        assert_eq!(edited.amount(), Money::from_cents(2500));
        assert_eq!(edited.date(), date(2));
        assert_eq!(edited.description(), Some("smaller"));
    }

    #[test]
    fn test_edit_operation_rejects_and_rolls_back() {
        // An uncovered new expense amount fails after the rollback step: the
        // balance ends at B + A while the record keeps the new fields.
        let (mut ledger, account_id, category_id) = ledger_with_account(10000);
        let op = Operation::new(
            OperationKind::Expense,
            account_id,
            Money::from_cents(4000),
            date(1),
            None,
            category_id,
        )
        .unwrap();
        let op_id = op.id();
        ledger.add_operation(op).unwrap();

        let err = ledger
            .edit_operation(op_id, Money::from_cents(20000), date(1), None, category_id)
            .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientFunds { .. }));

        assert_eq!(balance_of(&ledger, account_id), Money::from_cents(10000));
        assert_eq!(ledger.operations()[0].amount(), Money::from_cents(20000));
    }

    #[test]
    fn test_edit_operation_negative_amount_rejected_before_rollback() {
        let (mut ledger, account_id, category_id) = ledger_with_account(10000);
        let op = Operation::new(
            OperationKind::Income,
            account_id,
            Money::from_cents(1000),
            date(1),
            None,
            category_id,
        )
        .unwrap();
        let op_id = op.id();
        ledger.add_operation(op).unwrap();

        let err = ledger
            .edit_operation(op_id, Money::from_cents(-1), date(1), None, category_id)
            .unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(balance_of(&ledger, account_id), Money::from_cents(11000));
    }

    #[test]
    fn test_edit_operation_missing_operation() {
        let (mut ledger, _, category_id) = ledger_with_account(0);
        let err = ledger
            .edit_operation(
                OperationId::new(),
                Money::from_cents(100),
                date(1),
                None,
                category_id,
            )
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_remove_account_leaves_operations_dangling() {
        let (mut ledger, account_id, category_id) = ledger_with_account(10000);
        let op = Operation::new(
            OperationKind::Expense,
            account_id,
            Money::from_cents(100),
            date(1),
            None,
            category_id,
        )
        .unwrap();
        let op_id = op.id();
        ledger.add_operation(op).unwrap();

        ledger.remove_account(account_id).unwrap();

        // The operation record survives with its now-dangling reference
        let operations = ledger.operations();
        assert_eq!(operations.len(), 1);
        assert_eq!(operations[0].account_id(), account_id);

        // Editing it resolves the account to "not found"
        let err = ledger
            .edit_operation(op_id, Money::from_cents(50), date(1), None, category_id)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_remove_operation_keeps_balance() {
        let (mut ledger, account_id, category_id) = ledger_with_account(10000);
        let op = Operation::new(
            OperationKind::Income,
            account_id,
            Money::from_cents(5000),
            date(1),
            None,
            category_id,
        )
        .unwrap();
        let op_id = op.id();
        ledger.add_operation(op).unwrap();

        ledger.remove_operation(op_id).unwrap();

        assert!(ledger.operations().is_empty());
        assert_eq!(balance_of(&ledger, account_id), Money::from_cents(15000));
    }

    #[test]
    fn test_export_unsupported_format() {
        let ledger = Ledger::new();
        let err = ledger
            .export_data("xml", Path::new("out.xml"))
            .unwrap_err();
        assert!(matches!(err, LedgerError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_apply_document_rewinds_balances() {
        // A document's accounts carry post-operation balances; applying it
        // must reproduce them, not double-apply the operations.
        let (mut source, account_id, category_id) = ledger_with_account(10000);
        let op = Operation::new(
            OperationKind::Income,
            account_id,
            Money::from_cents(5000),
            date(1),
            None,
            category_id,
        )
        .unwrap();
        source.add_operation(op).unwrap();
        assert_eq!(balance_of(&source, account_id), Money::from_cents(15000));

        let mut target = Ledger::new();
        target.apply_document(source.to_document()).unwrap();

        assert_eq!(balance_of(&target, account_id), Money::from_cents(15000));
        assert_eq!(target.operations().len(), 1);
        assert_eq!(target.categories().len(), 1);
    }
}
