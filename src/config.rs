//! Configuration file handling.
//!
//! The configuration file is stored at `$EXPENSES_HOME/config.json` and contains the category
//! presets offered when adding an expense, the default category and backup settings.

use crate::backup::Backup;
use crate::model::Tracker;
use crate::utils;
use anyhow::{bail, ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "expenses";
const CONFIG_VERSION: u8 = 1;
const BACKUP_COPIES: u32 = 5;
const BACKUPS: &str = ".backups";
const CONFIG_JSON: &str = "config.json";
const EXPENSES_JSON: &str = "expenses.json";
const CHART_SVG: &str = "chart.svg";
const DEFAULT_CATEGORY: &str = "Food";
const CATEGORIES: [&str; 5] = ["Food", "Transportation", "Entertainment", "Utilities", "Other"];

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$EXPENSES_HOME` and from there it loads `$EXPENSES_HOME/config.json`. It provides
/// paths to the other files that live in the expenses home directory.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    backups: PathBuf,
    config_path: PathBuf,
    data_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the expenses home directory, its backups directory, a default `config.json` and an
    /// empty working data file. An existing data file is left alone.
    ///
    /// # Errors
    /// - Returns an error if `config.json` already exists.
    /// - Returns an error if any file operations fail.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative).context("Unable to create the expenses home directory")?;
        let root = utils::canonicalize(&maybe_relative)?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!(
                "The expenses home is already initialized, '{}' exists",
                config_path.display()
            )
        }

        let backups = root.join(BACKUPS);
        utils::make_dir(&backups)?;

        let config_file = ConfigFile::default();
        config_file.save(&config_path)?;

        let data_path = root.join(EXPENSES_JSON);
        if !data_path.is_file() {
            Tracker::new().save(&data_path)?;
        }

        Ok(Self {
            root,
            backups,
            config_path,
            data_path,
            config_file,
        })
    }

    /// This will
    /// - validate that `expenses_home` exists and that the config file exists
    /// - load and validate the config file
    /// - validate that the backups directory exists
    pub fn load(expenses_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = expenses_home.into();
        let root = utils::canonicalize(&maybe_relative).context(
            "The expenses home directory is missing, run 'expenses init' to create it",
        )?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path)?;

        let config = Self {
            root: root.clone(),
            backups: root.join(BACKUPS),
            config_path,
            data_path: root.join(EXPENSES_JSON),
            config_file,
        };
        if !config.backups.is_dir() {
            bail!(
                "The backups directory is missing '{}'",
                config.backups.display()
            )
        }
        Ok(config)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn backups(&self) -> &Path {
        &self.backups
    }

    /// The working data file that holds the current list between invocations.
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Where `chart` writes its SVG when no output path is given.
    pub fn chart_path(&self) -> PathBuf {
        self.root.join(CHART_SVG)
    }

    /// The category presets, in display order.
    pub fn categories(&self) -> &[String] {
        &self.config_file.categories
    }

    pub fn default_category(&self) -> &str {
        &self.config_file.default_category
    }

    /// True if `category` is one of the presets, ignoring case.
    pub fn is_preset(&self, category: &str) -> bool {
        let category = category.to_lowercase();
        self.categories()
            .iter()
            .any(|c| c.to_lowercase() == category)
    }

    pub fn backup_copies(&self) -> u32 {
        self.config_file.backup_copies
    }

    /// Creates a new `Backup` instance for managing backup files.
    pub fn backup(&self) -> Backup {
        Backup::new(self)
    }

    /// Loads the working list. A missing data file is an empty list.
    pub fn load_expenses(&self) -> Result<Tracker> {
        if !self.data_path.exists() {
            debug!(
                "No data file at {}, starting with an empty list",
                self.data_path.display()
            );
            return Ok(Tracker::new());
        }
        Tracker::load(&self.data_path)
    }

    /// Writes the working list.
    pub fn save_expenses(&self, tracker: &Tracker) -> Result<()> {
        tracker
            .save(&self.data_path)
            .context("Unable to update the working data file")
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "expenses",
///   "config_version": 1,
///   "categories": ["Food", "Transportation", "Entertainment", "Utilities", "Other"],
///   "default_category": "Food",
///   "backup_copies": 5
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "expenses"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Category presets offered when adding an expense. Free text is still accepted.
    #[serde(default = "default_categories")]
    categories: Vec<String>,

    /// Category used when none is given
    #[serde(default = "default_category")]
    default_category: String,

    /// Number of backup copies to keep
    #[serde(default = "default_backup_copies")]
    backup_copies: u32,
}

fn default_categories() -> Vec<String> {
    CATEGORIES.iter().map(|c| c.to_string()).collect()
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_backup_copies() -> u32 {
    BACKUP_COPIES
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            categories: default_categories(),
            default_category: default_category(),
            backup_copies: BACKUP_COPIES,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if its values are invalid.
    fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path)
            .with_context(|| format!("Failed to load config file at {}", path.display()))?;

        ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        ensure!(
            !config.default_category.trim().is_empty(),
            "The default_category in {} is empty",
            path.display()
        );
        ensure!(
            config.categories.iter().all(|c| !c.trim().is_empty()),
            "The categories in {} contain an empty name",
            path.display()
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data).context("Unable to write config file")
    }

    #[cfg(test)]
    fn new(categories: Vec<&str>, default_category: &str, backup_copies: u32) -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            categories: categories.into_iter().map(String::from).collect(),
            default_category: default_category.to_string(),
            backup_copies,
        }
    }
}
