//! Backup management for the working data file.
//!
//! Before a command replaces or destructively changes the working list, the current list is copied
//! into the backups directory so that an unwanted `load` or `remove` can be recovered by hand.

use crate::model::Tracker;
use crate::{utils, Config};
use anyhow::Result;
use chrono::Local;
use std::path::PathBuf;

/// Prefix for the snapshot taken before `load` replaces the list.
pub const PRE_LOAD: &str = "pre-load";

/// Prefix for the snapshot taken before `remove`.
pub const PRE_REMOVE: &str = "pre-remove";

/// Prefix for the snapshot taken before `edit`.
pub const PRE_EDIT: &str = "pre-edit";

/// Manages backup file creation and rotation.
///
/// The `Backup` struct is immutable and owns copies of the paths and settings it needs.
/// Create a new instance via `Config::backup()` or `Backup::new()`.
#[derive(Debug, Clone)]
pub struct Backup {
    backups_dir: PathBuf,
    backup_copies: u32,
}

impl Backup {
    /// Creates a new `Backup` instance from a `Config`.
    pub fn new(config: &Config) -> Self {
        Self {
            backups_dir: config.backups().to_path_buf(),
            backup_copies: config.backup_copies(),
        }
    }

    /// Saves the list as a JSON backup file.
    ///
    /// The filename format is `{prefix}.YYYY-MM-DD-NNN.json` where NNN is a sequence number.
    /// Automatically rotates old backups, keeping only `backup_copies` files per prefix.
    ///
    /// Returns the path to the created backup file.
    pub fn save_json(&self, prefix: &str, tracker: &Tracker) -> Result<PathBuf> {
        let date = today();
        let seq = self.next_sequence_number(prefix, &date)?;
        let filename = format!("{prefix}.{date}-{seq:03}.json");
        let path = self.backups_dir.join(&filename);

        tracker.save(&path)?;

        self.rotate(prefix)?;

        Ok(path)
    }

    /// Scans the backups directory for existing files with the given prefix and date,
    /// and returns the next sequence number.
    fn next_sequence_number(&self, prefix: &str, date: &str) -> Result<u32> {
        let max_seq = utils::read_dir(&self.backups_dir)?
            .into_iter()
            .filter_map(|entry| {
                parse_sequence_number(&entry.file_name().to_string_lossy(), prefix, date)
            })
            .max()
            .unwrap_or(0);
        Ok(max_seq + 1)
    }

    /// Rotates old backup files, keeping only `backup_copies` files with the given prefix.
    fn rotate(&self, prefix: &str) -> Result<()> {
        let mut files: Vec<(PathBuf, String)> = utils::read_dir(&self.backups_dir)?
            .into_iter()
            .map(|entry| (entry.path(), entry.file_name().to_string_lossy().to_string()))
            .filter(|(_, name)| is_backup_file(name, prefix))
            .collect();

        // Sort by filename (which sorts by date and sequence number due to format)
        files.sort_by(|a, b| a.1.cmp(&b.1));

        let to_delete = files.len().saturating_sub(self.backup_copies as usize);
        for (path, _) in files.into_iter().take(to_delete) {
            utils::remove(&path)?;
        }

        Ok(())
    }
}

/// Returns today's date in YYYY-MM-DD format.
fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Parses the sequence number from a backup filename of the form `{prefix}.{date}-{NNN}.json`.
/// Returns None if the filename doesn't match the expected pattern.
fn parse_sequence_number(filename: &str, prefix: &str, date: &str) -> Option<u32> {
    let expected_start = format!("{prefix}.{date}-");
    filename
        .strip_prefix(&expected_start)?
        .strip_suffix(".json")?
        .parse()
        .ok()
}

/// Checks if a filename is a backup file with the given prefix.
fn is_backup_file(filename: &str, prefix: &str) -> bool {
    filename.starts_with(&format!("{prefix}.")) && filename.ends_with(".json")
}
