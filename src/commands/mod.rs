//! Command handlers for the expenses CLI.
//!
//! This module contains implementations for all CLI subcommands. Each handler loads the working
//! list from the expenses home, performs one operation and writes the list back when it changed.

mod chart;
mod delete;
mod file;
mod init;
mod insert;
mod query;
mod update;

use crate::error::{Error, ErrorType, IntoResult};
use crate::model::Amount;
use crate::{Config, Result};
use anyhow::anyhow;
use serde::Serialize;
use std::fmt::Debug;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

pub use chart::chart;
pub use delete::remove;
pub use file::{load, save};
pub use init::init;
pub use insert::add;
pub use query::{categories, list, total};
pub use update::edit;

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to stdout and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        println!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// Loads the configuration from `$EXPENSES_HOME`.
pub fn load_config(expenses_home: &Path) -> Result<Config> {
    Config::load(expenses_home).pub_result(ErrorType::Config)
}

/// Parses user input such as `12.50` or `$1,200` into an `Amount`.
fn parse_amount(s: &str) -> Result<Amount> {
    Amount::from_str(s).map_err(|e| {
        debug!("Unable to parse '{s}' as an amount: {e}");
        validation("Amount must be a number.")
    })
}

fn validation(message: &'static str) -> Error {
    Error::new(ErrorType::Validation, anyhow!(message))
}

/// `"1 expense"` or `"3 expenses"`.
fn plural(count: usize) -> String {
    format!("{count} expense{}", if count == 1 { "" } else { "s" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("$1,200").unwrap().to_string(), "1200.00");
        let err = parse_amount("abc").unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Validation);
        assert_eq!(err.to_string(), "Amount must be a number.");
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1), "1 expense");
        assert_eq!(plural(0), "0 expenses");
    }

    #[test]
    fn test_load_config_missing_home_is_config_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = load_config(&dir.path().join("missing")).unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Config);
    }
}
