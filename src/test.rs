//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::model::{Amount, Tracker};
use crate::Config;
use std::str::FromStr;
use tempfile::TempDir;

/// Test environment that sets up an expenses home directory with a Config and an empty data file.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub struct TestEnv {
    temp_dir: TempDir,
    config: Config,
}

impl TestEnv {
    /// Creates a test environment with an initialized expenses home.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("expenses");
        let config = Config::create(&root).unwrap();
        Self { temp_dir, config }
    }

    /// Returns a clone of the Config.
    pub fn config(&self) -> Config {
        self.config.clone()
    }

    /// A scratch directory outside of the expenses home, for save/load targets.
    pub fn scratch(&self) -> &std::path::Path {
        self.temp_dir.path()
    }

    /// Four expenses across three categories totalling 112.50.
    pub fn sample_tracker(&self) -> Tracker {
        let mut tracker = Tracker::new();
        for (description, amount, category) in [
            ("Groceries", "52.10", "Food"),
            ("Bus pass", "30.00", "Transportation"),
            ("Pizza", "18.40", "Food"),
            ("Movie", "12.00", "Entertainment"),
        ] {
            tracker
                .add(description, Amount::from_str(amount).unwrap(), category)
                .unwrap();
        }
        tracker
    }

    /// Writes the sample expenses into the working data file.
    pub fn insert_sample_expenses(&self) {
        self.config.save_expenses(&self.sample_tracker()).unwrap();
    }

    /// Reads the working data file.
    pub fn expenses(&self) -> Tracker {
        self.config.load_expenses().unwrap()
    }
}
