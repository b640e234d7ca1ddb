use crate::model::{Amount, Expense, ExpenseUpdates};
use crate::utils;
use anyhow::{bail, ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

const NO_MATCH: &str = "No matching expense found.";
const NEGATIVE: &str = "Amount cannot be negative.";
const TOO_LARGE: &str = "Amount cannot be larger than 999,999,999,999.99.";
const TOTAL_OVERFLOW: &str = "Total of expenses is too large to compute.";

/// Rejects negative or oversized amounts and rounds the rest to whole cents.
fn checked_amount(amount: Amount) -> Result<Amount> {
    ensure!(!amount.is_negative(), NEGATIVE);
    let rounded = amount.round_cents();
    ensure!(rounded <= Amount::MAX, TOO_LARGE);
    Ok(rounded)
}

/// The ordered list of expenses. Insertion order is display order.
///
/// Serializes as a bare JSON array of `{description, amount, category}` objects, which is also the
/// on-disk format used by `save` and `load`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tracker {
    expenses: Vec<Expense>,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new expense. The amount is stored rounded to whole cents.
    ///
    /// # Errors
    /// - Returns an error if `amount` is negative or larger than `Amount::MAX`. The list is left
    ///   unchanged.
    pub fn add(
        &mut self,
        description: impl Into<String>,
        amount: Amount,
        category: impl Into<String>,
    ) -> Result<&Expense> {
        let amount = checked_amount(amount)?;
        self.expenses
            .push(Expense::new(description, amount, category));
        let idx = self.expenses.len() - 1;
        Ok(&self.expenses[idx])
    }

    /// All expenses in insertion order.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// The sum of all amounts, zero when the list is empty.
    ///
    /// # Errors
    /// - Returns an error if the sum overflows.
    pub fn total(&self) -> Result<Amount> {
        self.expenses
            .iter()
            .try_fold(Amount::ZERO, |sum, e| sum.checked_add(e.amount()))
            .context(TOTAL_OVERFLOW)
    }

    /// Removes every expense whose description or category matches `key` (ignoring case).
    ///
    /// Returns the removed expenses in their original order.
    ///
    /// # Errors
    /// - Returns an error if nothing matches.
    pub fn remove(&mut self, key: &str) -> Result<Vec<Expense>> {
        if !self.expenses.iter().any(|e| e.matches(key)) {
            bail!(NO_MATCH);
        }
        let (removed, kept): (Vec<Expense>, Vec<Expense>) = std::mem::take(&mut self.expenses)
            .into_iter()
            .partition(|e| e.matches(key));
        self.expenses = kept;
        debug!("Removed {} expense(s) matching '{key}'", removed.len());
        Ok(removed)
    }

    /// Applies `updates` to every expense whose description or category matches `key`.
    ///
    /// All checks run before anything is modified, so a failed edit leaves the list untouched.
    /// Returns the edited expenses as they are after the update.
    ///
    /// # Errors
    /// - Returns an error if nothing matches.
    /// - Returns an error if the new amount is negative or larger than `Amount::MAX`.
    pub fn edit(&mut self, key: &str, updates: &ExpenseUpdates) -> Result<Vec<Expense>> {
        if !self.expenses.iter().any(|e| e.matches(key)) {
            bail!(NO_MATCH);
        }
        let updates = match updates.amount() {
            Some(amount) => updates.with_amount(checked_amount(amount)?),
            None => updates.clone(),
        };
        let mut edited = Vec::new();
        for expense in self.expenses.iter_mut().filter(|e| e.matches(key)) {
            expense.apply(&updates);
            edited.push(expense.clone());
        }
        debug!("Edited {} expense(s) matching '{key}'", edited.len());
        Ok(edited)
    }

    /// Totals per category, in order of each category's first appearance. Categories are grouped
    /// by exact text, so `Food` and `food` are separate slices.
    ///
    /// # Errors
    /// - Returns an error if a category's sum overflows.
    pub fn category_totals(&self) -> Result<Vec<(String, Amount)>> {
        let mut totals: Vec<(String, Amount)> = Vec::new();
        for expense in &self.expenses {
            match totals.iter_mut().find(|(c, _)| c == expense.category()) {
                Some((_, sum)) => {
                    *sum = sum
                        .checked_add(expense.amount())
                        .context(TOTAL_OVERFLOW)?
                }
                None => totals.push((expense.category().to_string(), expense.amount())),
            }
        }
        Ok(totals)
    }

    /// Writes the list to `path` as a JSON array.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("Unable to serialize expenses")?;
        utils::write(path, json)?;
        debug!("Saved {} expense(s) to {}", self.len(), path.display());
        Ok(())
    }

    /// Reads a list previously written by `save`, then checks it with `validate`.
    ///
    /// # Errors
    /// - Returns an error if the file cannot be read or is not a JSON array of expenses.
    /// - Returns an error if any stored amount is negative or too large.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::read(path)?.validate()
    }

    /// Reads a JSON array of expenses without checking the amounts.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let tracker: Tracker = utils::deserialize(path)?;
        debug!("Read {} expense(s) from {}", tracker.len(), path.display());
        Ok(tracker)
    }

    /// Applies the same amount checks as `add` to every expense, rounding amounts to whole cents.
    ///
    /// # Errors
    /// - Returns an error naming the first expense with a negative or oversized amount.
    pub fn validate(mut self) -> Result<Self> {
        for expense in &mut self.expenses {
            expense.amount = checked_amount(expense.amount()).with_context(|| {
                format!("Expense '{}' has an invalid amount", expense.description())
            })?;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use tempfile::TempDir;

    fn amt(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
    }

    fn sample() -> Tracker {
        let mut t = Tracker::new();
        t.add("Groceries", amt("52.10"), "Food").unwrap();
        t.add("Bus pass", amt("30"), "Transportation").unwrap();
        t.add("Pizza", amt("18.40"), "Food").unwrap();
        t.add("Movie", amt("12"), "Entertainment").unwrap();
        t
    }

    #[test]
    fn test_add_negative_fails() {
        let mut t = sample();
        let err = t.add("Refund", amt("-5"), "Other").unwrap_err();
        assert_eq!(err.to_string(), "Amount cannot be negative.");
        assert_eq!(t.len(), 4);
    }

    #[test]
    fn test_add_zero_is_allowed() {
        let mut t = Tracker::new();
        let added = t.add("Free sample", Amount::ZERO, "Food").unwrap();
        assert_eq!(added.description(), "Free sample");
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn test_expenses_keep_insertion_order() {
        let t = sample();
        let names: Vec<&str> = t.expenses().iter().map(Expense::description).collect();
        assert_eq!(names, vec!["Groceries", "Bus pass", "Pizza", "Movie"]);
    }

    #[test]
    fn test_total() {
        assert_eq!(sample().total().unwrap(), amt("112.50"));
        assert_eq!(Tracker::new().total().unwrap(), Amount::ZERO);
    }

    #[test]
    fn test_total_overflow_is_error() {
        let huge = r#"[
            {"description": "A", "amount": "79228162514264337593543950335", "category": "Food"},
            {"description": "B", "amount": "79228162514264337593543950335", "category": "Food"}
        ]"#;
        let t: Tracker = serde_json::from_str(huge).unwrap();
        let err = t.total().unwrap_err();
        assert_eq!(err.to_string(), "Total of expenses is too large to compute.");
        assert!(t.category_totals().is_err());
        assert!(t.validate().is_err());
    }

    #[test]
    fn test_add_too_large_fails() {
        let mut t = Tracker::new();
        let err = t
            .add("Island", amt("79228162514264337593543950335"), "Other")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Amount cannot be larger than 999,999,999,999.99."
        );
        assert!(t.is_empty());

        t.add("Largest", Amount::MAX, "Other").unwrap();
        t.add("Largest again", Amount::MAX, "Other").unwrap();
        assert_eq!(t.total().unwrap(), amt("1999999999999.98"));
    }

    #[test]
    fn test_add_rounds_to_cents() {
        let mut t = Tracker::new();
        let added = t
            .add("Fuel", amt("1234567890.123456789"), "Transportation")
            .unwrap();
        assert_eq!(added.amount(), amt("1234567890.12"));
    }

    #[test]
    fn test_remove_by_category_removes_all() {
        let mut t = sample();
        let removed = t.remove("food").unwrap();
        assert_eq!(removed.len(), 2);
        assert!(t.expenses().iter().all(|e| e.category() != "Food"));
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn test_remove_by_description() {
        let mut t = sample();
        let removed = t.remove("BUS PASS").unwrap();
        assert_eq!(removed, vec![Expense::new("Bus pass", amt("30"), "Transportation")]);
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn test_remove_no_match() {
        let mut t = sample();
        let err = t.remove("Rent").unwrap_err();
        assert_eq!(err.to_string(), "No matching expense found.");
        assert_eq!(t, sample());
    }

    #[test]
    fn test_edit_applies_to_all_matches() {
        let mut t = sample();
        let updates = ExpenseUpdates::new(None, Some(amt("20")), Some("Dining".into()));
        let edited = t.edit("Food", &updates).unwrap();
        assert_eq!(edited.len(), 2);
        assert_eq!(t.expenses()[0], Expense::new("Groceries", amt("20"), "Dining"));
        assert_eq!(t.expenses()[2], Expense::new("Pizza", amt("20"), "Dining"));
    }

    #[test]
    fn test_edit_negative_amount_changes_nothing() {
        let mut t = sample();
        let updates = ExpenseUpdates::new(Some("Changed".into()), Some(amt("-1")), None);
        let err = t.edit("Food", &updates).unwrap_err();
        assert_eq!(err.to_string(), "Amount cannot be negative.");
        assert_eq!(t, sample());
    }

    #[test]
    fn test_edit_too_large_changes_nothing() {
        let mut t = sample();
        let updates = ExpenseUpdates::new(None, Some(amt("1000000000000")), None);
        assert!(t.edit("Pizza", &updates).is_err());
        assert_eq!(t, sample());
    }

    #[test]
    fn test_edit_no_match() {
        let mut t = sample();
        let err = t.edit("Rent", &ExpenseUpdates::default()).unwrap_err();
        assert_eq!(err.to_string(), "No matching expense found.");
    }

    #[test]
    fn test_category_totals_in_first_seen_order() {
        let totals = sample().category_totals().unwrap();
        assert_eq!(
            totals,
            vec![
                ("Food".to_string(), amt("70.50")),
                ("Transportation".to_string(), amt("30")),
                ("Entertainment".to_string(), amt("12")),
            ]
        );
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("expenses.json");
        let t = sample();
        t.save(&path).unwrap();
        assert_eq!(Tracker::load(&path).unwrap(), t);
    }

    #[test]
    fn test_round_trip_exact_decimal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("expenses.json");
        let mut t = Tracker::new();
        t.add("Fuel", amt("1234567890.123456789"), "Transportation").unwrap();
        t.add("Yacht", Amount::MAX, "Other").unwrap();
        t.add("Gum", amt("0.01"), "Food").unwrap();
        t.save(&path).unwrap();

        let loaded = Tracker::load(&path).unwrap();
        assert_eq!(loaded, t);
        assert_eq!(loaded.expenses()[0].amount(), amt("1234567890.12"));
        assert_eq!(loaded.expenses()[1].amount(), Amount::MAX);
    }

    #[test]
    fn test_load_plain_json_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("in.json");
        std::fs::write(
            &path,
            r#"[{"description": "Tea", "amount": 3, "category": "Food"}]"#,
        )
        .unwrap();
        let t = Tracker::load(&path).unwrap();
        assert_eq!(t.expenses(), &[Expense::new("Tea", amt("3"), "Food")]);
    }

    #[test]
    fn test_load_rejects_negative_amount() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("in.json");
        std::fs::write(
            &path,
            r#"[{"description": "Tea", "amount": -3, "category": "Food"}]"#,
        )
        .unwrap();
        assert!(Tracker::load(&path).is_err());
        assert_eq!(Tracker::read(&path).unwrap().len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(Tracker::load(dir.path().join("nope.json")).is_err());
    }
}
