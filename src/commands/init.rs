use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the expenses home directory and its contents:
/// - a default `config.json` with the category presets
/// - the `.backups` directory
/// - an empty working data file, unless one already exists
///
/// # Errors
/// - Returns an error if the directory is already initialized or any file operation fails.
pub fn init(expenses_home: &Path) -> Result<Out<()>> {
    let config = Config::create(expenses_home)
        .context("Unable to create the expenses home directory and config")
        .pub_result(ErrorType::Config)?;
    Ok(format!(
        "Successfully created the expenses home at {}",
        config.root().display()
    )
    .into())
}
