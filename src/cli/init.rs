//! Init command implementation

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use questlog::Config;
use questlog::store::write_defaults;

use super::Options;

/// Create the config file and the data files with a starter rank ladder
pub fn init_command(opts: &Options, force: bool) -> Result<()> {
    let config_path = opts
        .config
        .clone()
        .unwrap_or_else(Config::global_config_path);
    let data_dir = opts.data_dir()?;

    write_config(&config_path, &data_dir, force)?;

    let written = write_defaults(&data_dir, force)
        .with_context(|| format!("Failed to create data files in {}", data_dir.display()))?;
    for path in &written {
        println!("Created: {}", path.display());
    }
    if written.is_empty() {
        println!(
            "Data files already exist in {}\nUse --force to overwrite.",
            data_dir.display()
        );
    }

    Ok(())
}

fn write_config(config_path: &Path, data_dir: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        info!("Keeping existing config: {}", config_path.display());
        return Ok(());
    }

    // Store an absolute path so the config works from any directory
    let data_dir = std::path::absolute(data_dir)
        .with_context(|| format!("Failed to resolve {}", data_dir.display()))?;

    let config = Config {
        data_dir,
        default_user: None,
    };
    config.save_to_file(config_path)?;
    println!("Created: {}", config_path.display());
    Ok(())
}
