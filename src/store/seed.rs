//! Default data files for a fresh data directory

use std::path::{Path, PathBuf};

use tracing::info;

use super::csv_io::write_rows;
use super::record::Record;
use crate::error::{Result, TrackerError};
use crate::models::{Activity, Reward, Tier, User};

/// Name of the user created by `write_defaults`
pub const DEFAULT_USER: &str = "player";

/// The stock rank ladder, easiest first
pub fn default_tiers() -> Vec<Tier> {
    vec![
        Tier::new("Beginner", 0, 0),
        Tier::new("Novice", 100, 5),
        Tier::new("Apprentice", 300, 15),
        Tier::new("Adept", 750, 40),
        Tier::new("Expert", 1500, 80),
        Tier::new("Master", 3000, 150),
        Tier::new("Legend", 6000, 300),
    ]
}

/// Create the four record files in `dir`
///
/// Existing files are left alone unless `force` is set. Returns the paths
/// that were written.
pub fn write_defaults(dir: &Path, force: bool) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).map_err(|e| TrackerError::io(dir, e))?;

    let mut written = Vec::new();
    write_if_needed(dir, force, &[User::new(DEFAULT_USER)], &mut written)?;
    write_if_needed::<Activity>(dir, force, &[], &mut written)?;
    write_if_needed::<Reward>(dir, force, &[], &mut written)?;
    write_if_needed(dir, force, &default_tiers(), &mut written)?;
    Ok(written)
}

fn write_if_needed<T: Record>(
    dir: &Path,
    force: bool,
    rows: &[T],
    written: &mut Vec<PathBuf>,
) -> Result<()> {
    let path = dir.join(T::FILE_NAME);
    if path.exists() && !force {
        info!(path = %path.display(), "Keeping existing file");
        return Ok(());
    }
    write_rows(&path, T::HEADERS, rows)?;
    written.push(path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_load_cleanly() {
        let dir = tempdir().unwrap();
        let written = write_defaults(dir.path(), false).unwrap();
        assert_eq!(written.len(), 4);

        let store = Store::load(dir.path()).unwrap();
        assert_eq!(store.users().len(), 1);
        assert_eq!(store.tiers().first().map(|t| t.name.as_str()), Some("Beginner"));
        assert!(store.activities().is_empty());
    }

    #[test]
    fn test_existing_files_kept_without_force() {
        let dir = tempdir().unwrap();
        write_defaults(dir.path(), false).unwrap();
        std::fs::write(
            dir.path().join("users.csv"),
            "name,total_points,activities_completed,alltime_points\nsam,5,1,5\n",
        )
        .unwrap();

        let written = write_defaults(dir.path(), false).unwrap();
        assert!(written.is_empty());
        let store = Store::load(dir.path()).unwrap();
        assert!(store.users().find("sam").is_some());

        let written = write_defaults(dir.path(), true).unwrap();
        assert_eq!(written.len(), 4);
    }
}
