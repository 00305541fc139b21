//! Core expense domain types.

mod stored;
mod validation;

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::Date;

pub use stored::{decode_snapshot, encode_snapshot};
pub use validation::{ExpenseDraft, MAX_AMOUNT, ValidationError, validate_expense};

/// The kind of purchase an expense was for.
///
/// The set of categories is fixed; there are no user-defined categories.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Category {
    /// Meals, snacks and groceries.
    #[default]
    Food,
    /// Fares, fuel and tickets.
    Travel,
    /// Clothes, gadgets and household items.
    Shopping,
    /// Rent, utilities and other recurring charges.
    Bills,
    /// Subscriptions, films and outings.
    Entertainment,
    /// Medicine and doctor visits.
    Health,
    /// Anything that does not fit elsewhere.
    Others,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 7] = [
        Category::Food,
        Category::Travel,
        Category::Shopping,
        Category::Bills,
        Category::Entertainment,
        Category::Health,
        Category::Others,
    ];

    /// The canonical display name, e.g. "Entertainment".
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Travel => "Travel",
            Category::Shopping => "Shopping",
            Category::Bills => "Bills",
            Category::Entertainment => "Entertainment",
            Category::Health => "Health",
            Category::Others => "Others",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    /// Parse a category name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();

        Category::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ValidationError::UnknownCategory(name.to_owned()))
    }
}

/// Selects which expenses to show: every expense, or a single category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Show every expense.
    #[default]
    All,
    /// Show only expenses in this category.
    Only(Category),
}

impl CategoryFilter {
    /// The sentinel name that selects every category.
    pub const ALL_LABEL: &'static str = "All";

    /// Whether `category` passes this filter.
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => *selected == category,
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

impl Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(Self::ALL_LABEL),
            CategoryFilter::Only(category) => write!(f, "{category}"),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(Self::ALL_LABEL) {
            Ok(CategoryFilter::All)
        } else {
            s.parse::<Category>().map(CategoryFilter::Only)
        }
    }
}

/// Identifier for an expense, unique within an expense list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(i64);

impl ExpenseId {
    /// Wrap a raw ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw integer value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for ExpenseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ExpenseId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A validated, non-empty, trimmed description of a purchase.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseTitle(String);

impl ExpenseTitle {
    /// Create a title from user input.
    ///
    /// # Errors
    ///
    /// This function will return an [ValidationError::EmptyTitle] if `title`
    /// is empty or only whitespace.
    pub fn new(title: &str) -> Result<Self, ValidationError> {
        let title = title.trim();

        if title.is_empty() {
            Err(ValidationError::EmptyTitle)
        } else {
            Ok(Self(title.to_owned()))
        }
    }

    /// Create a title without validation.
    ///
    /// The caller should ensure that the string is trimmed and not empty.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if the non-empty invariant is violated it will cause incorrect behaviour but not affect memory safety.
    pub fn new_unchecked(title: &str) -> Self {
        Self(title.to_owned())
    }
}

impl AsRef<str> for ExpenseTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ExpenseTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Money spent on a single purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    /// The ID of the expense.
    pub id: ExpenseId,
    /// What the money was spent on.
    pub title: ExpenseTitle,
    /// How much was spent. Always greater than zero.
    pub amount: f64,
    /// The kind of purchase.
    pub category: Category,
    /// The day the expense was recorded.
    pub date: Date,
}
