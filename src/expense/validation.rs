//! Validation of raw add-expense form input.

use crate::expense::{Category, ExpenseTitle};

/// The largest amount a single expense may record.
pub const MAX_AMOUNT: f64 = 1_000_000_000_000.0;

/// Reasons why form input cannot be turned into an expense.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ValidationError {
    /// The title was empty or only whitespace.
    #[error("enter a description of what you bought")]
    EmptyTitle,

    /// No amount was entered.
    #[error("enter an amount")]
    MissingAmount,

    /// The amount text is not a number.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// The amount was zero or negative.
    #[error("the amount must be greater than zero, got {0}")]
    NonPositiveAmount(f64),

    /// The amount was above [MAX_AMOUNT].
    #[error("the amount must be at most {MAX_AMOUNT}, got {0}")]
    AmountTooLarge(f64),

    /// The category name is not one of the fixed categories.
    #[error("\"{0}\" is not a valid category")]
    UnknownCategory(String),
}

/// Form input that has passed validation and is ready to become an expense.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    /// The trimmed title.
    pub title: ExpenseTitle,
    /// The parsed amount, always greater than zero.
    pub amount: f64,
    /// The selected category.
    pub category: Category,
}

/// Check the add-expense form input.
///
/// The title is trimmed and must not be empty. The amount is trimmed and must
/// parse as a finite decimal number greater than zero and at most
/// [MAX_AMOUNT].
///
/// # Errors
///
/// Returns the first problem found, checking the title before the amount.
pub fn validate_expense(
    title: &str,
    amount_raw: &str,
    category: Category,
) -> Result<ExpenseDraft, ValidationError> {
    let title = ExpenseTitle::new(title)?;
    let amount = parse_amount(amount_raw)?;

    Ok(ExpenseDraft {
        title,
        amount,
        category,
    })
}

fn parse_amount(amount_raw: &str) -> Result<f64, ValidationError> {
    let amount_raw = amount_raw.trim();

    if amount_raw.is_empty() {
        return Err(ValidationError::MissingAmount);
    }

    let amount: f64 = amount_raw
        .parse()
        .map_err(|_| ValidationError::InvalidAmount(amount_raw.to_owned()))?;

    // `f64::from_str` accepts "inf" and "NaN".
    if !amount.is_finite() {
        return Err(ValidationError::InvalidAmount(amount_raw.to_owned()));
    }

    if amount <= 0.0 {
        return Err(ValidationError::NonPositiveAmount(amount));
    }

    if amount > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge(amount));
    }

    Ok(amount)
}
