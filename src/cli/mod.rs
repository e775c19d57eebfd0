//! CLI command implementations

pub mod display;
pub mod init;
pub mod menu;
pub mod records;
pub mod status;
pub mod users;

use std::path::PathBuf;

use anyhow::{Context, Result};

use questlog::{Config, Tracker, TrackerError};

/// Global flags that decide where data comes from
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub config: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub user: Option<String>,
}

impl Options {
    pub fn config(&self) -> Result<Config> {
        Config::load(self.config.as_deref())
    }

    /// Data directory from the flag, falling back to the config file
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(self.config()?.data_dir),
        }
    }

    pub fn open_tracker(&self) -> Result<Tracker> {
        let config = self.config()?;
        let data_dir = self.data_dir.clone().unwrap_or(config.data_dir);
        let user = self.user.clone().or(config.default_user);

        Tracker::open(&data_dir, user.as_deref()).map_err(|e| {
            let hint = match e {
                TrackerError::MissingStore { .. } => "\nRun `questlog init` to create the data files.",
                _ => "",
            };
            anyhow::Error::new(e).context(format!(
                "Failed to load data from {}{hint}",
                data_dir.display()
            ))
        })
    }
}

/// Save the active user after a one-shot command changed it
pub fn save(tracker: &mut Tracker) -> Result<()> {
    tracker
        .save_active_user()
        .context("Failed to save progress")
}
