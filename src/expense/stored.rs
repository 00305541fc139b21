//! The persisted form of an expense list.
//!
//! A snapshot is a JSON array of records:
//!
//! ```json
//! [{"id": 1, "title": "Coffee", "amount": 4.5, "category": "Food", "date": "2025-10-29"}]
//! ```
//!
//! Older snapshots stored the description under `name` instead of `title`.
//! Decoding migrates these records: `title` is used when it is present and not
//! blank, otherwise `name`. Encoding only ever writes `title`, so a legacy
//! record is rewritten in the current layout the next time the list is saved.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::expense::{Category, Expense, ExpenseId, ExpenseTitle, MAX_AMOUNT, ValidationError};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

#[derive(Serialize)]
struct StoredExpense<'a> {
    id: ExpenseId,
    title: &'a str,
    amount: f64,
    category: Category,
    #[serde(with = "iso_date")]
    date: Date,
}

#[derive(Deserialize)]
struct LoadedExpense {
    id: ExpenseId,
    title: Option<String>,
    name: Option<String>,
    amount: f64,
    category: String,
    #[serde(with = "iso_date")]
    date: Date,
}

impl TryFrom<LoadedExpense> for Expense {
    type Error = ValidationError;

    fn try_from(record: LoadedExpense) -> Result<Self, Self::Error> {
        let title = match record.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title,
            _ => record.name.as_deref().unwrap_or_default(),
        };
        let title = ExpenseTitle::new(title)?;

        if !record.amount.is_finite() || record.amount <= 0.0 {
            return Err(ValidationError::NonPositiveAmount(record.amount));
        }

        if record.amount > MAX_AMOUNT {
            return Err(ValidationError::AmountTooLarge(record.amount));
        }

        Ok(Expense {
            id: record.id,
            title,
            amount: record.amount,
            category: record.category.parse()?,
            date: record.date,
        })
    }
}

/// Serialize `expenses` as a JSON snapshot.
///
/// # Errors
/// Returns a [serde_json::Error] if serialization fails, which should not
/// happen for well-formed expenses.
pub fn encode_snapshot(expenses: &[Expense]) -> Result<String, serde_json::Error> {
    let records: Vec<StoredExpense> = expenses
        .iter()
        .map(|expense| StoredExpense {
            id: expense.id,
            title: expense.title.as_ref(),
            amount: expense.amount,
            category: expense.category,
            date: expense.date,
        })
        .collect();

    serde_json::to_string(&records)
}

/// Parse a JSON snapshot into a list of expenses, preserving order.
///
/// Records that cannot be decoded, that break an expense invariant, or that
/// reuse an ID seen earlier in the snapshot are skipped and logged.
///
/// # Errors
/// Returns a [serde_json::Error] if `raw` is not a JSON array.
pub fn decode_snapshot(raw: &str) -> Result<Vec<Expense>, serde_json::Error> {
    let values: Vec<serde_json::Value> = serde_json::from_str(raw)?;
    let mut seen_ids = HashSet::with_capacity(values.len());
    let mut expenses = Vec::with_capacity(values.len());

    for (index, value) in values.into_iter().enumerate() {
        let record: LoadedExpense = match serde_json::from_value(value) {
            Ok(record) => record,
            Err(error) => {
                tracing::warn!("Skipping unreadable expense record at index {index}: {error}");
                continue;
            }
        };

        let expense = match Expense::try_from(record) {
            Ok(expense) => expense,
            Err(error) => {
                tracing::warn!("Skipping invalid expense record at index {index}: {error}");
                continue;
            }
        };

        if !seen_ids.insert(expense.id) {
            tracing::warn!(
                "Skipping expense record at index {index} with duplicate ID {}",
                expense.id
            );
            continue;
        }

        expenses.push(expense);
    }

    Ok(expenses)
}
