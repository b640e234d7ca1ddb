//! Remove command handler.

use crate::args::RemoveArgs;
use crate::backup::PRE_REMOVE;
use crate::commands::{plural, Out};
use crate::error::{ErrorType, IntoResult};
use crate::model::Expense;
use crate::{Config, Result};
use tracing::debug;

/// Removes every expense whose description or category matches the key, ignoring case.
///
/// The list as it was before the removal is saved to the backups directory.
///
/// # Errors
///
/// - Returns an error if no expense matches. Nothing is removed or backed up.
/// - Returns an error if the working data file or backup cannot be read or written.
pub fn remove(config: Config, args: RemoveArgs) -> Result<Out<Vec<Expense>>> {
    let mut tracker = config.load_expenses().pub_result(ErrorType::Io)?;
    let before = tracker.clone();
    let removed = tracker
        .remove(args.key())
        .pub_result(ErrorType::Validation)?;

    let backup_path = config
        .backup()
        .save_json(PRE_REMOVE, &before)
        .pub_result(ErrorType::Io)?;
    debug!("Saved backup to {}", backup_path.display());
    config.save_expenses(&tracker).pub_result(ErrorType::Io)?;

    Ok(Out::new(format!("Removed {}", plural(removed.len())), removed))
}
