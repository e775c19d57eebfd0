//! Configuration loading and management

mod io;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding users.csv, activities.csv, rewards.csv and achievements.csv
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// User made active at startup (defaults to the first user in users.csv)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_user: Option<String>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            default_user: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());

        let config: Config = toml::from_str("default_user = \"sam\"").unwrap();
        assert_eq!(config.data_dir, PathBuf::from("."));
        assert_eq!(config.default_user.as_deref(), Some("sam"));
    }
}
