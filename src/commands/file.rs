//! Save and load command handlers.

use crate::args::PathArgs;
use crate::backup::PRE_LOAD;
use crate::commands::{plural, Out};
use crate::error::{ErrorType, IntoResult};
use crate::model::{Expense, Tracker};
use crate::{Config, Result};
use std::path::PathBuf;
use tracing::debug;

/// Writes the working list to the given file as a JSON array.
///
/// If the file name has no extension, `.json` is appended.
pub fn save(config: Config, args: PathArgs) -> Result<Out<PathBuf>> {
    let path = with_default_extension(args.path().to_path_buf());
    let tracker = config.load_expenses().pub_result(ErrorType::Io)?;
    tracker.save(&path).pub_result(ErrorType::Io)?;
    Ok(Out::new(
        format!("Saved {} to {}", plural(tracker.len()), path.display()),
        path,
    ))
}

/// Replaces the working list with the expenses stored in the given file.
///
/// The current list is saved to the backups directory first, unless it is empty.
///
/// # Errors
///
/// - Returns an error if the file cannot be read or is not a JSON array of expenses.
/// - Returns an error if the file contains a negative or oversized amount.
///
/// The working list is left unchanged on error.
pub fn load(config: Config, args: PathArgs) -> Result<Out<Vec<Expense>>> {
    let loaded = Tracker::read(args.path())
        .pub_result(ErrorType::Io)?
        .validate()
        .pub_result(ErrorType::Validation)?;

    let current = config.load_expenses().pub_result(ErrorType::Io)?;
    if !current.is_empty() {
        let backup_path = config
            .backup()
            .save_json(PRE_LOAD, &current)
            .pub_result(ErrorType::Io)?;
        debug!("Saved backup to {}", backup_path.display());
    }
    config.save_expenses(&loaded).pub_result(ErrorType::Io)?;

    Ok(Out::new(
        format!(
            "Loaded {} from {}",
            plural(loaded.len()),
            args.path().display()
        ),
        loaded.expenses().to_vec(),
    ))
}

fn with_default_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension("json")
    }
}
