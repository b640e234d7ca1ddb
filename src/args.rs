//! These structs provide the CLI interface for the expenses CLI.

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// expenses: A command-line tool for recording personal expenses.
///
/// Expenses are kept in a working list inside the expenses home directory. You can add, list,
/// edit and remove them, save the list to a JSON file or load one back, see the total, and chart
/// your spending by category.
///
/// Run `expenses init` once to create the expenses home directory.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the expenses home directory and its default configuration.
    ///
    /// The configuration lives in `config.json` and holds the category presets, the default
    /// category and the number of backup copies to keep.
    Init,
    /// Record a new expense.
    Add(AddArgs),
    /// Show all expenses in the order they were added.
    List(ListArgs),
    /// Remove every expense whose description or category matches KEY (ignoring case).
    Remove(RemoveArgs),
    /// Change every expense whose description or category matches KEY (ignoring case).
    Edit(EditArgs),
    /// Show the sum of all expenses.
    Total,
    /// Save the expense list to a JSON file.
    Save(PathArgs),
    /// Replace the expense list with the contents of a JSON file.
    ///
    /// The current list is copied to the backups directory first.
    Load(PathArgs),
    /// Chart spending by category as a pie chart.
    Chart(ChartArgs),
    /// Show the category presets.
    Categories,
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where expense data and configuration is held. Defaults to ~/expenses
    #[arg(long, env = "EXPENSES_HOME", default_value_t = default_expenses_home())]
    expenses_home: DisplayPath,
}

impl Common {
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn expenses_home(&self) -> &DisplayPath {
        &self.expenses_home
    }
}

/// Args for the `expenses add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    /// What the money was spent on.
    #[arg(long, short)]
    description: String,

    /// How much was spent, e.g. 12.50 or $1,200.00. Must not be negative.
    #[arg(long, short, allow_hyphen_values = true)]
    amount: String,

    /// The category. Defaults to the configured default category. Any text is accepted.
    #[arg(long, short)]
    category: Option<String>,
}

impl AddArgs {
    pub fn new(
        description: impl Into<String>,
        amount: impl Into<String>,
        category: Option<String>,
    ) -> Self {
        Self {
            description: description.into(),
            amount: amount.into(),
            category,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

/// Output format for `expenses list`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ListFormat {
    /// An aligned table with Description, Amount and Category columns.
    #[default]
    Table,
    /// The same JSON array that `save` writes.
    Json,
    /// Comma separated values with a header row.
    Csv,
}

serde_plain::derive_display_from_serialize!(ListFormat);
serde_plain::derive_fromstr_from_deserialize!(ListFormat);

/// Args for the `expenses list` command.
#[derive(Debug, Parser, Clone)]
pub struct ListArgs {
    /// How to print the list.
    #[arg(long, value_enum, default_value_t = ListFormat::Table)]
    format: ListFormat,
}

impl ListArgs {
    pub fn new(format: ListFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> ListFormat {
        self.format
    }
}

/// Args for the `expenses remove` command.
#[derive(Debug, Parser, Clone)]
pub struct RemoveArgs {
    /// A description or category. Every matching expense is removed.
    key: String,
}

impl RemoveArgs {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Args for the `expenses edit` command.
#[derive(Debug, Parser, Clone)]
pub struct EditArgs {
    /// A description or category. Every matching expense is changed.
    key: String,

    /// The new description. Empty means unchanged.
    #[arg(long, short)]
    description: Option<String>,

    /// The new amount. Must not be negative.
    #[arg(long, short, allow_hyphen_values = true)]
    amount: Option<String>,

    /// The new category. Empty means unchanged.
    #[arg(long, short)]
    category: Option<String>,
}

impl EditArgs {
    pub fn new(
        key: impl Into<String>,
        description: Option<String>,
        amount: Option<String>,
        category: Option<String>,
    ) -> Self {
        Self {
            key: key.into(),
            description,
            amount,
            category,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn amount(&self) -> Option<&str> {
        self.amount.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

/// Args for the `expenses save` and `expenses load` commands.
#[derive(Debug, Parser, Clone)]
pub struct PathArgs {
    /// The JSON file. When saving, `.json` is appended if the name has no extension.
    path: PathBuf,
}

impl PathArgs {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Args for the `expenses chart` command.
#[derive(Debug, Parser, Clone)]
pub struct ChartArgs {
    /// Where to write the SVG pie chart. Defaults to $EXPENSES_HOME/chart.svg
    #[arg(long, short)]
    output: Option<PathBuf>,
}

impl ChartArgs {
    pub fn new(output: Option<PathBuf>) -> Self {
        Self { output }
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }
}

fn default_expenses_home() -> DisplayPath {
    DisplayPath::from(match dirs::home_dir() {
        Some(home) => home.join("expenses"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --expenses-home or EXPENSES_HOME instead of relying on the \
                default expenses home directory.",
            );
            PathBuf::from("expenses")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
