//! Types that represent the core data model: `Expense`, `Amount` and the `Tracker` list.
mod amount;
mod expense;
mod tracker;

pub use amount::{Amount, AmountError};
pub use expense::{Expense, ExpenseUpdates};
pub use tracker::Tracker;
