//! Expense tracker is a small, single-user tool for recording what you spend.
//!
//! This library provides the [ExpenseStore], which holds the list of expenses,
//! keeps a key-value [storage] medium in sync after every change, and derives
//! the running total, the per-category breakdown and filtered views.

#![warn(missing_docs)]

pub mod config;
pub mod currency;
pub mod expense;
pub mod form;
pub mod logging;
pub mod storage;
pub mod store;

pub use config::Config;
pub use currency::CurrencyFormatter;
pub use expense::{
    Category, CategoryFilter, Expense, ExpenseId, ExpenseTitle, ValidationError,
    validate_expense,
};
pub use form::ExpenseForm;
pub use store::{EXPENSES_KEY, ExpenseStore, default_expenses};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The add-expense input was rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Reading or writing a file failed.
    ///
    /// Holds the original error as a string.
    #[error("an I/O error occurred: {0}")]
    Io(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// The storage key cannot be mapped to a location on the storage medium.
    #[error("\"{0}\" is not a valid storage key")]
    InvalidStorageKey(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// The currency symbol could not be used to build a number formatter.
    #[error("invalid currency symbol \"{0}\"")]
    InvalidCurrencySymbol(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::Io(value.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::JSONSerializationError(value.to_string())
    }
}
