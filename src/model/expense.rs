use crate::model::Amount;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A single recorded expense.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Expense {
    pub(crate) description: String,
    pub(crate) amount: Amount,
    pub(crate) category: String,
}

impl Expense {
    pub fn new(description: impl Into<String>, amount: Amount, category: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            amount,
            category: category.into(),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// True when `key` equals either the description or the category, ignoring case.
    pub fn matches(&self, key: &str) -> bool {
        let key = key.to_lowercase();
        self.description.to_lowercase() == key || self.category.to_lowercase() == key
    }

    /// Applies the non-empty fields of `updates`.
    pub(crate) fn apply(&mut self, updates: &ExpenseUpdates) {
        if let Some(description) = updates.description() {
            self.description = description.to_string();
        }
        if let Some(amount) = updates.amount() {
            self.amount = amount;
        }
        if let Some(category) = updates.category() {
            self.category = category.to_string();
        }
    }
}

impl Display for Expense {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}) - {}", self.description, self.category, self.amount)
    }
}

/// Field changes for `Tracker::edit`. A field that is `None` or an empty string is left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ExpenseUpdates {
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
}

impl ExpenseUpdates {
    pub fn new(
        description: Option<String>,
        amount: Option<Amount>,
        category: Option<String>,
    ) -> Self {
        Self {
            description,
            amount,
            category,
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|s| !s.is_empty())
    }

    pub fn amount(&self) -> Option<Amount> {
        self.amount
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|s| !s.is_empty())
    }

    /// A copy of these updates with the amount replaced.
    pub(crate) fn with_amount(&self, amount: Amount) -> Self {
        Self {
            amount: Some(amount),
            ..self.clone()
        }
    }

    /// True when applying these updates would change nothing.
    pub fn is_empty(&self) -> bool {
        self.description().is_none() && self.amount().is_none() && self.category().is_none()
    }
}
