//! Edit command handler.

use crate::args::EditArgs;
use crate::backup::PRE_EDIT;
use crate::commands::{parse_amount, plural, Out};
use crate::error::{ErrorType, IntoResult};
use crate::model::{Expense, ExpenseUpdates};
use crate::{Config, Result};
use tracing::debug;

/// Updates every expense whose description or category matches the key, ignoring case.
///
/// Fields that are absent or empty are left unchanged. The list as it was before the edit is saved
/// to the backups directory.
///
/// # Returns
///
/// On success, returns an `Out` containing:
/// - A message indicating how many expenses were edited.
/// - The edited expenses as they are after the update.
///
/// # Errors
///
/// - Returns an error if the new amount is not a number or is negative. Nothing is changed.
/// - Returns an error if no expense matches.
/// - Returns an error if the working data file or backup cannot be read or written.
pub fn edit(config: Config, args: EditArgs) -> Result<Out<Vec<Expense>>> {
    let amount = match args.amount().map(str::trim) {
        Some(s) if !s.is_empty() => Some(parse_amount(s)?),
        _ => None,
    };
    let updates = ExpenseUpdates::new(
        args.description().map(|s| s.trim().to_string()),
        amount,
        args.category().map(|s| s.trim().to_string()),
    );
    if updates.is_empty() {
        debug!("No changes were given for '{}'", args.key());
    }

    let mut tracker = config.load_expenses().pub_result(ErrorType::Io)?;
    let before = tracker.clone();
    let edited = tracker
        .edit(args.key(), &updates)
        .pub_result(ErrorType::Validation)?;

    let backup_path = config
        .backup()
        .save_json(PRE_EDIT, &before)
        .pub_result(ErrorType::Io)?;
    debug!("Saved backup to {}", backup_path.display());
    config.save_expenses(&tracker).pub_result(ErrorType::Io)?;

    Ok(Out::new(format!("Edited {}", plural(edited.len())), edited))
}
