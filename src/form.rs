//! Transient input state for the add-expense form and the list filter.

use crate::{
    expense::{Category, CategoryFilter, Expense, ValidationError},
    storage::KeyValueStorage,
    store::ExpenseStore,
};

/// What the user has typed into the add-expense form, plus the active filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseForm {
    /// Draft description of the purchase.
    pub title: String,
    /// Draft amount, exactly as typed.
    pub amount: String,
    /// The category selected for the next expense.
    pub category: Category,
    /// Which expenses the list shows.
    pub filter: CategoryFilter,
}

impl ExpenseForm {
    /// Create an empty form with the default category and no filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the drafted expense to `store`.
    ///
    /// On success the title and amount drafts are cleared, while the selected
    /// category and filter are kept. On failure the drafts are left as typed
    /// so the user can correct them.
    ///
    /// # Errors
    ///
    /// Returns a [ValidationError] if the drafts are rejected by the store.
    pub fn submit<S: KeyValueStorage>(
        &mut self,
        store: &mut ExpenseStore<S>,
    ) -> Result<Expense, ValidationError> {
        let expense = store.add(&self.title, &self.amount, self.category)?;

        self.title.clear();
        self.amount.clear();

        Ok(expense)
    }

    /// The expenses to show under the active filter.
    pub fn visible<'a, S>(&self, store: &'a ExpenseStore<S>) -> Vec<&'a Expense> {
        store.filtered(self.filter)
    }
}
