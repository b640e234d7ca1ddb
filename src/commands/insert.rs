//! Add command handler.

use crate::args::AddArgs;
use crate::commands::{parse_amount, validation, Out};
use crate::error::{ErrorType, IntoResult};
use crate::model::Expense;
use crate::{Config, Result};
use tracing::debug;

/// Appends a new expense to the working list.
///
/// When no category is given the configured default is used. Categories outside of the presets
/// are accepted as free text.
///
/// # Errors
///
/// - Returns an error if the description or category is empty.
/// - Returns an error if the amount is not a number or is negative.
/// - Returns an error if the working data file cannot be read or written.
pub fn add(config: Config, args: AddArgs) -> Result<Out<Expense>> {
    let description = args.description().trim();
    let category = args
        .category()
        .unwrap_or(config.default_category())
        .trim();
    if description.is_empty() || category.is_empty() || args.amount().trim().is_empty() {
        return Err(validation("All fields are required."));
    }
    let amount = parse_amount(args.amount())?;
    if !config.is_preset(category) {
        debug!("'{category}' is not one of the category presets, adding it as free text");
    }

    let mut tracker = config.load_expenses().pub_result(ErrorType::Io)?;
    let expense = tracker
        .add(description, amount, category)
        .pub_result(ErrorType::Validation)?
        .clone();
    config.save_expenses(&tracker).pub_result(ErrorType::Io)?;

    Ok(Out::new(format!("Added {expense}"), expense))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Amount;
    use crate::test::TestEnv;
    use std::str::FromStr;

    #[test]
    fn test_add_success() {
        let env = TestEnv::new();
        let args = AddArgs::new("Lunch", "12.5", Some("Food".into()));
        let out = add(env.config(), args).unwrap();
        assert_eq!(out.message(), "Added Lunch (Food) - 12.50");

        let tracker = env.expenses();
        assert_eq!(
            tracker.expenses(),
            &[Expense::new("Lunch", Amount::from_str("12.5").unwrap(), "Food")]
        );
    }

    #[test]
    fn test_add_appends_in_order() {
        let env = TestEnv::new();
        env.insert_sample_expenses();
        add(env.config(), AddArgs::new("Power bill", "$80", Some("Utilities".into()))).unwrap();
        let tracker = env.expenses();
        assert_eq!(tracker.len(), 5);
        assert_eq!(tracker.expenses()[4].description(), "Power bill");
    }

    #[test]
    fn test_add_uses_default_category() {
        let env = TestEnv::new();
        let out = add(env.config(), AddArgs::new("Bagel", "3", None)).unwrap();
        assert_eq!(out.structure().unwrap().category(), "Food");
    }

    #[test]
    fn test_add_free_text_category() {
        let env = TestEnv::new();
        add(env.config(), AddArgs::new("Vet", "90", Some("Pets".into()))).unwrap();
        assert_eq!(env.expenses().expenses()[0].category(), "Pets");
    }

    #[test]
    fn test_add_negative_fails() {
        let env = TestEnv::new();
        let err = add(env.config(), AddArgs::new("Refund", "-5", None)).unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Validation);
        assert_eq!(err.to_string(), "Amount cannot be negative.");
        assert!(env.expenses().is_empty());
    }

    #[test]
    fn test_add_too_large_fails() {
        let env = TestEnv::new();
        let args = AddArgs::new("Island", "79228162514264337593543950335", None);
        let err = add(env.config(), args).unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Validation);
        assert!(env.expenses().is_empty());

        // The list stays readable after the largest accepted amount.
        add(env.config(), AddArgs::new("Yacht", "$999,999,999,999.99", None)).unwrap();
        assert_eq!(env.expenses().expenses()[0].amount(), Amount::MAX);
    }

    #[test]
    fn test_add_not_a_number() {
        let env = TestEnv::new();
        let err = add(env.config(), AddArgs::new("Lunch", "lots", None)).unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Validation);
        assert_eq!(err.to_string(), "Amount must be a number.");
    }

    #[test]
    fn test_add_missing_fields() {
        let env = TestEnv::new();
        for args in [
            AddArgs::new("  ", "5", None),
            AddArgs::new("Lunch", "", None),
            AddArgs::new("Lunch", "5", Some(" ".into())),
        ] {
            let err = add(env.config(), args).unwrap_err();
            assert_eq!(err.to_string(), "All fields are required.");
        }
        assert!(env.expenses().is_empty());
    }
}
