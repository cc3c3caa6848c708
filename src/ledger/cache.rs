//! Read-through cache in front of the ledger engine
//!
//! Wraps any [`LedgerOps`] implementation behind the same contract. List
//! reads are memoized per collection for a fixed wall-clock freshness
//! window; every mutating call forwards to the inner engine and drops the
//! slots it could affect. Analytics and export always pass through, since
//! they are derivations that must reflect fresh filtering, not raw
//! collection membership.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::time::{Duration, Instant};

use chrono::NaiveDateTime;

use crate::error::LedgerResult;
use crate::models::{
    Account, AccountId, Category, CategoryId, Money, Operation, OperationId, OperationKind,
};

use super::LedgerOps;

/// How long a memoized list read stays valid
pub const FRESHNESS_WINDOW: Duration = Duration::from_secs(30);

/// Caching proxy satisfying the same contract as the engine
pub struct CachedLedger<L> {
    inner: L,
    freshness: Duration,
    accounts: RefCell<Slot<Account>>,
    categories: RefCell<Slot<Category>>,
    operations: RefCell<Slot<Operation>>,
}

/// One memoized collection snapshot with its fill time
struct Slot<T> {
    value: Option<(Vec<T>, Instant)>,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self { value: None }
    }
}

impl<T: Clone> Slot<T> {
    fn fresh(&self, window: Duration) -> Option<Vec<T>> {
        self.value
            .as_ref()
            .filter(|(_, stamp)| stamp.elapsed() < window)
            .map(|(items, _)| items.clone())
    }

    fn fill(&mut self, items: Vec<T>) {
        self.value = Some((items, Instant::now()));
    }

    fn invalidate(&mut self) {
        self.value = None;
    }
}

impl<L: LedgerOps> CachedLedger<L> {
    /// Wrap an engine with the default 30-second freshness window
    pub fn new(inner: L) -> Self {
        Self::with_freshness(inner, FRESHNESS_WINDOW)
    }

    /// Wrap an engine with a custom freshness window
    pub fn with_freshness(inner: L, freshness: Duration) -> Self {
        Self {
            inner,
            freshness,
            accounts: RefCell::new(Slot::default()),
            categories: RefCell::new(Slot::default()),
            operations: RefCell::new(Slot::default()),
        }
    }

    /// Unwrap the proxy, returning the inner engine
    pub fn into_inner(self) -> L {
        self.inner
    }

    fn cached<T: Clone>(
        slot: &RefCell<Slot<T>>,
        freshness: Duration,
        fetch: impl FnOnce() -> Vec<T>,
    ) -> Vec<T> {
        if let Some(items) = slot.borrow().fresh(freshness) {
            return items;
        }
        let items = fetch();
        slot.borrow_mut().fill(items.clone());
        items
    }

    fn invalidate_accounts(&self) {
        self.accounts.borrow_mut().invalidate();
    }

    fn invalidate_categories(&self) {
        self.categories.borrow_mut().invalidate();
    }

    fn invalidate_operations(&self) {
        self.operations.borrow_mut().invalidate();
    }
}

impl<L: LedgerOps> LedgerOps for CachedLedger<L> {
    fn add_account(&mut self, account: Account) {
        self.inner.add_account(account);
        self.invalidate_accounts();
    }

    fn remove_account(&mut self, id: AccountId) -> LedgerResult<()> {
        let result = self.inner.remove_account(id);
        self.invalidate_accounts();
        result
    }

    fn edit_account(&mut self, id: AccountId, new_name: &str) -> LedgerResult<()> {
        let result = self.inner.edit_account(id, new_name);
        self.invalidate_accounts();
        result
    }

    fn add_category(&mut self, category: Category) {
        self.inner.add_category(category);
        self.invalidate_categories();
    }

    fn remove_category(&mut self, id: CategoryId) -> LedgerResult<()> {
        let result = self.inner.remove_category(id);
        self.invalidate_categories();
        result
    }

    fn edit_category(
        &mut self,
        id: CategoryId,
        new_name: &str,
        new_kind: OperationKind,
    ) -> LedgerResult<()> {
        let result = self.inner.edit_category(id, new_name, new_kind);
        self.invalidate_categories();
        result
    }

    fn add_operation(&mut self, operation: Operation) -> LedgerResult<()> {
        let result = self.inner.add_operation(operation);
        // Recording an operation also moves the owning account's balance
        self.invalidate_operations();
        self.invalidate_accounts();
        result
    }

    fn remove_operation(&mut self, id: OperationId) -> LedgerResult<()> {
        let result = self.inner.remove_operation(id);
        self.invalidate_operations();
        result
    }

    fn edit_operation(
        &mut self,
        id: OperationId,
        new_amount: Money,
        new_date: NaiveDateTime,
        new_description: Option<String>,
        new_category_id: CategoryId,
    ) -> LedgerResult<()> {
        let result =
            self.inner
                .edit_operation(id, new_amount, new_date, new_description, new_category_id);
        // Invalidate even on failure: a rejected edit can still have rolled
        // the balance back and updated the record
        self.invalidate_operations();
        self.invalidate_accounts();
        result
    }

    fn accounts(&self) -> Vec<Account> {
        Self::cached(&self.accounts, self.freshness, || self.inner.accounts())
    }

    fn categories(&self) -> Vec<Category> {
        Self::cached(&self.categories, self.freshness, || self.inner.categories())
    }

    fn operations(&self) -> Vec<Operation> {
        Self::cached(&self.operations, self.freshness, || self.inner.operations())
    }

    fn income_expense_difference(&self, start: NaiveDateTime, end: NaiveDateTime) -> Money {
        self.inner.income_expense_difference(start, end)
    }

    fn operations_by_category(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> HashMap<CategoryId, Money> {
        self.inner.operations_by_category(start, end)
    }

    fn export_data(&self, format: &str, path: &Path) -> LedgerResult<()> {
        self.inner.export_data(format, path)
    }

    fn import_data(&mut self, format: &str, path: &Path) -> LedgerResult<()> {
        let result = self.inner.import_data(format, path);
        // An import can touch any of the three collections
        self.invalidate_accounts();
        self.invalidate_categories();
        self.invalidate_operations();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Ledger;
    use chrono::NaiveDate;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Counts list reads hitting the real engine
    #[derive(Clone, Default)]
    struct ReadCounts {
        accounts: Rc<Cell<usize>>,
        categories: Rc<Cell<usize>>,
        operations: Rc<Cell<usize>>,
    }

    struct SpyLedger {
        inner: Ledger,
        reads: ReadCounts,
    }

    impl SpyLedger {
        fn new() -> (Self, ReadCounts) {
            let reads = ReadCounts::default();
            (
                Self {
                    inner: Ledger::new(),
                    reads: reads.clone(),
                },
                reads,
            )
        }
    }

    impl LedgerOps for SpyLedger {
        fn add_account(&mut self, account: Account) {
            self.inner.add_account(account)
        }

        fn remove_account(&mut self, id: AccountId) -> LedgerResult<()> {
            self.inner.remove_account(id)
        }

        fn edit_account(&mut self, id: AccountId, new_name: &str) -> LedgerResult<()> {
            self.inner.edit_account(id, new_name)
        }

        fn add_category(&mut self, category: Category) {
            self.inner.add_category(category)
        }

        fn remove_category(&mut self, id: CategoryId) -> LedgerResult<()> {
            self.inner.remove_category(id)
        }

        fn edit_category(
            &mut self,
            id: CategoryId,
            new_name: &str,
            new_kind: OperationKind,
        ) -> LedgerResult<()> {
            self.inner.edit_category(id, new_name, new_kind)
        }

        fn add_operation(&mut self, operation: Operation) -> LedgerResult<()> {
            self.inner.add_operation(operation)
        }

        fn remove_operation(&mut self, id: OperationId) -> LedgerResult<()> {
            self.inner.remove_operation(id)
        }

        fn edit_operation(
            &mut self,
            id: OperationId,
            new_amount: Money,
            new_date: NaiveDateTime,
            new_description: Option<String>,
            new_category_id: CategoryId,
        ) -> LedgerResult<()> {
            self.inner
                .edit_operation(id, new_amount, new_date, new_description, new_category_id)
        }

        fn accounts(&self) -> Vec<Account> {
            self.reads.accounts.set(self.reads.accounts.get() + 1);
            self.inner.accounts()
        }

        fn categories(&self) -> Vec<Category> {
            self.reads.categories.set(self.reads.categories.get() + 1);
            self.inner.categories()
        }

        fn operations(&self) -> Vec<Operation> {
            self.reads.operations.set(self.reads.operations.get() + 1);
            self.inner.operations()
        }

        fn income_expense_difference(&self, start: NaiveDateTime, end: NaiveDateTime) -> Money {
            self.inner.income_expense_difference(start, end)
        }

        fn operations_by_category(
            &self,
            start: NaiveDateTime,
            end: NaiveDateTime,
        ) -> HashMap<CategoryId, Money> {
            self.inner.operations_by_category(start, end)
        }

        fn export_data(&self, format: &str, path: &Path) -> LedgerResult<()> {
            self.inner.export_data(format, path)
        }

        fn import_data(&mut self, format: &str, path: &Path) -> LedgerResult<()> {
            self.inner.import_data(format, path)
        }
    }

    fn sample_date() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_reads_are_memoized_within_window() {
        let (spy, reads) = SpyLedger::new();
        let proxy = CachedLedger::new(spy);

        proxy.accounts();
        proxy.accounts();
        proxy.accounts();

        assert_eq!(reads.accounts.get(), 1);
    }

    #[test]
    fn test_expired_window_refetches() {
        let (spy, reads) = SpyLedger::new();
        let proxy = CachedLedger::with_freshness(spy, Duration::ZERO);

        proxy.accounts();
        proxy.accounts();

        assert_eq!(reads.accounts.get(), 2);
    }

    #[test]
    fn test_write_invalidates_matching_slot_only() {
        let (spy, reads) = SpyLedger::new();
        let mut proxy = CachedLedger::new(spy);

        proxy.accounts();
        proxy.categories();
        assert_eq!(reads.accounts.get(), 1);
        assert_eq!(reads.categories.get(), 1);

        proxy.add_category(Category::new(OperationKind::Expense, "Food").unwrap());

        proxy.accounts();
        proxy.categories();
        assert_eq!(reads.accounts.get(), 1, "accounts slot must stay cached");
        assert_eq!(reads.categories.get(), 2, "categories slot must refetch");
    }

    #[test]
    fn test_operation_write_invalidates_accounts_too() {
        let (spy, reads) = SpyLedger::new();
        let mut proxy = CachedLedger::new(spy);

        let account = Account::new("Checking", Money::from_cents(10000)).unwrap();
        let account_id = account.id();
        proxy.add_account(account);
        let category = Category::new(OperationKind::Income, "Salary").unwrap();
        let category_id = category.id();
        proxy.add_category(category);

        proxy.accounts();
        assert_eq!(reads.accounts.get(), 1);

        let op = Operation::new(
            OperationKind::Income,
            account_id,
            Money::from_cents(5000),
            sample_date(),
            None,
            category_id,
        )
        .unwrap();
        proxy.add_operation(op).unwrap();

        let accounts = proxy.accounts();
        assert_eq!(reads.accounts.get(), 2);
        assert_eq!(accounts[0].balance(), Money::from_cents(15000));
    }

    #[test]
    fn test_import_invalidates_all_slots() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        std::fs::write(&path, "{}").unwrap();

        let (spy, reads) = SpyLedger::new();
        let mut proxy = CachedLedger::new(spy);

        proxy.accounts();
        proxy.categories();
        proxy.operations();

        proxy.import_data("json", &path).unwrap();

        proxy.accounts();
        proxy.categories();
        proxy.operations();

        assert_eq!(reads.accounts.get(), 2);
        assert_eq!(reads.categories.get(), 2);
        assert_eq!(reads.operations.get(), 2);
    }

    #[test]
    fn test_analytics_pass_through() {
        let (spy, _) = SpyLedger::new();
        let mut proxy = CachedLedger::new(spy);

        let account = Account::new("Checking", Money::from_cents(10000)).unwrap();
        let account_id = account.id();
        proxy.add_account(account);
        let category = Category::new(OperationKind::Income, "Salary").unwrap();
        let category_id = category.id();
        proxy.add_category(category);

        proxy
            .add_operation(
                Operation::new(
                    OperationKind::Income,
                    account_id,
                    Money::from_cents(10000),
                    sample_date(),
                    None,
                    category_id,
                )
                .unwrap(),
            )
            .unwrap();
        proxy
            .add_operation(
                Operation::new(
                    OperationKind::Expense,
                    account_id,
                    Money::from_cents(4000),
                    sample_date(),
                    None,
                    category_id,
                )
                .unwrap(),
            )
            .unwrap();

        let start = sample_date() - chrono::Duration::days(1);
        let end = sample_date() + chrono::Duration::days(1);
        assert_eq!(
            proxy.income_expense_difference(start, end),
            Money::from_cents(6000)
        );
    }
}
