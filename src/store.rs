//! The expense store: the list of expenses, kept in sync with a storage medium.

use std::collections::{BTreeMap, HashSet};

use time::{OffsetDateTime, UtcOffset, macros::date};

use crate::{
    Error,
    expense::{
        Category, CategoryFilter, Expense, ExpenseId, ExpenseTitle, ValidationError,
        decode_snapshot, encode_snapshot, validate_expense,
    },
    storage::KeyValueStorage,
};

/// The storage key the expense snapshot is saved under.
pub const EXPENSES_KEY: &str = "expenses";

/// The example expenses shown when nothing has been saved yet.
pub fn default_expenses() -> Vec<Expense> {
    vec![
        Expense {
            id: ExpenseId::new(1),
            title: ExpenseTitle::new_unchecked("Breakfast at cafe"),
            amount: 180.0,
            category: Category::Food,
            date: date!(2025 - 10 - 29),
        },
        Expense {
            id: ExpenseId::new(2),
            title: ExpenseTitle::new_unchecked("Auto to office"),
            amount: 50.0,
            category: Category::Travel,
            date: date!(2025 - 10 - 30),
        },
        Expense {
            id: ExpenseId::new(3),
            title: ExpenseTitle::new_unchecked("Netflix subscription"),
            amount: 649.0,
            category: Category::Entertainment,
            date: date!(2025 - 10 - 28),
        },
    ]
}

/// Holds the expense list and writes it to `storage` after every change.
///
/// The most recently added expense is always first in the list.
#[derive(Debug)]
pub struct ExpenseStore<S> {
    storage: S,
    expenses: Vec<Expense>,
    local_offset: UtcOffset,
    unsaved_changes: bool,
}

impl<S: KeyValueStorage> ExpenseStore<S> {
    /// Load the saved expenses from `storage`.
    ///
    /// If nothing has been saved yet, the store starts with
    /// [default_expenses] and saves them. If the saved snapshot cannot be
    /// read, the store also starts with the defaults but leaves the old
    /// snapshot in place until the next change overwrites it.
    ///
    /// `local_offset` determines which day counts as "today" for new expenses.
    pub fn load(storage: S, local_offset: UtcOffset) -> Self {
        let (expenses, save_defaults) = match storage.get(EXPENSES_KEY) {
            Ok(Some(raw)) => match decode_snapshot(&raw) {
                Ok(expenses) => {
                    tracing::debug!("Loaded {} expenses from storage", expenses.len());
                    (expenses, false)
                }
                Err(error) => {
                    tracing::warn!("Saved expenses are unreadable, using defaults: {error}");
                    (default_expenses(), false)
                }
            },
            Ok(None) => {
                tracing::debug!("No saved expenses found, using defaults");
                (default_expenses(), true)
            }
            Err(error) => {
                tracing::warn!("Could not read saved expenses, using defaults: {error}");
                (default_expenses(), false)
            }
        };

        let mut store = Self {
            storage,
            expenses,
            local_offset,
            unsaved_changes: false,
        };

        if save_defaults {
            store.persist();
        }

        store
    }

    /// Record a new expense from raw form input and save the list.
    ///
    /// The expense is dated today and placed at the start of the list.
    ///
    /// # Errors
    ///
    /// Returns a [ValidationError] if the input is rejected by
    /// [validate_expense]. The list and storage are left untouched.
    pub fn add(
        &mut self,
        title: &str,
        amount_raw: &str,
        category: Category,
    ) -> Result<Expense, ValidationError> {
        let draft = validate_expense(title, amount_raw, category)?;

        let expense = Expense {
            id: self.next_id(),
            title: draft.title,
            amount: draft.amount,
            category: draft.category,
            date: self.today(),
        };

        tracing::debug!("Adding expense {}: {}", expense.id, expense.title);
        self.expenses.insert(0, expense.clone());
        self.persist();

        Ok(expense)
    }

    /// Remove the expense with `id` and save the list.
    ///
    /// Deleting an ID that is not in the list is not an error. Returns whether
    /// an expense was removed.
    pub fn delete(&mut self, id: ExpenseId) -> bool {
        let removed = match self.expenses.iter().position(|expense| expense.id == id) {
            Some(index) => {
                self.expenses.remove(index);
                true
            }
            None => {
                tracing::debug!("Tried to delete expense {id}, which is not in the list");
                false
            }
        };

        self.persist();

        removed
    }

    /// Write the whole expense list to storage, replacing the previous snapshot.
    ///
    /// [ExpenseStore::add] and [ExpenseStore::delete] call this for you. Call
    /// it directly to retry after [ExpenseStore::has_unsaved_changes] reports
    /// a failed write.
    ///
    /// # Errors
    ///
    /// Returns an [Error] if the list cannot be serialized or written.
    pub fn save(&mut self) -> Result<(), Error> {
        let snapshot = encode_snapshot(&self.expenses)?;
        self.storage.set(EXPENSES_KEY, &snapshot)?;
        self.unsaved_changes = false;

        tracing::debug!("Saved {} expenses", self.expenses.len());

        Ok(())
    }

    /// Whether the most recent write to storage failed.
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved_changes
    }

    fn persist(&mut self) {
        if let Err(error) = self.save() {
            tracing::error!("Could not save expenses: {error}");
            self.unsaved_changes = true;
        }
    }

    fn next_id(&self) -> ExpenseId {
        let now = (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64;
        let max_id = self.expenses.iter().map(|expense| expense.id.as_i64()).max();

        let id = match max_id {
            None => now,
            Some(max_id) => match max_id.checked_add(1) {
                Some(min_free_id) => now.max(min_free_id),
                None => self.unused_id_below_max(),
            },
        };

        ExpenseId::new(id)
    }

    /// Find an ID not in the list when the largest ID in use is `i64::MAX`.
    fn unused_id_below_max(&self) -> i64 {
        let used: HashSet<i64> = self
            .expenses
            .iter()
            .map(|expense| expense.id.as_i64())
            .collect();

        let below_min = used
            .iter()
            .min()
            .and_then(|min_id| min_id.checked_sub(1));

        // The list holds at most `used.len()` IDs, so the scan stops early.
        below_min
            .or_else(|| (0..=i64::MAX).find(|id| !used.contains(id)))
            .unwrap_or_default()
    }

    fn today(&self) -> time::Date {
        OffsetDateTime::now_utc().to_offset(self.local_offset).date()
    }
}

impl<S> ExpenseStore<S> {
    /// Every expense, most recent first.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Find the expense with `id`.
    pub fn get(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    /// The number of expenses.
    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    /// Whether there are no expenses.
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// The sum of every expense amount. Zero for an empty list.
    pub fn total(&self) -> f64 {
        self.expenses.iter().map(|expense| expense.amount).sum()
    }

    /// The total amount spent in each category.
    ///
    /// Only categories with at least one expense are included.
    pub fn category_totals(&self) -> BTreeMap<Category, f64> {
        let mut totals = BTreeMap::new();

        for expense in &self.expenses {
            *totals.entry(expense.category).or_insert(0.0) += expense.amount;
        }

        totals
    }

    /// The expenses that pass `filter`, in list order.
    pub fn filtered(&self, filter: CategoryFilter) -> Vec<&Expense> {
        self.expenses
            .iter()
            .filter(|expense| filter.matches(expense.category))
            .collect()
    }

    /// The offset used to decide which day is today.
    pub fn local_offset(&self) -> UtcOffset {
        self.local_offset
    }

    /// The storage medium the store saves to.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the store and return its storage medium.
    pub fn into_storage(self) -> S {
        self.storage
    }
}
