//! Flat-file record store
//!
//! Four independent collections live side by side in one data directory:
//!
//! ```text
//! <data_dir>/
//! ├── users.csv          name, total_points, activities_completed, alltime_points
//! ├── activities.csv     activity_name, activity_points, daily_task
//! ├── rewards.csv        reward_name, reward_price, regular_reward
//! └── achievements.csv   achievement_name, points_required, tasks_required
//! ```
//!
//! Adds append a single row. Edits and deletes rewrite the whole file.

mod collection;
mod csv_io;
mod record;
mod seed;

pub use collection::Collection;
pub use record::Record;
pub use seed::{DEFAULT_USER, default_tiers, write_defaults};

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, TrackerError};
use crate::models::{Activity, Reward, Tier, User};

/// All persisted state, owned by the application context
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
    users: Collection<User>,
    activities: Collection<Activity>,
    rewards: Collection<Reward>,
    tiers: Vec<Tier>,
}

impl Store {
    /// Load every collection from `dir`
    ///
    /// Nothing is returned unless all four files load and pass validation.
    pub fn load(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        let users: Collection<User> = Collection::open(&dir)?;
        let activities: Collection<Activity> = Collection::open(&dir)?;
        let rewards: Collection<Reward> = Collection::open(&dir)?;
        let tiers = read_tiers(&dir)?;

        let store = Self {
            dir,
            users,
            activities,
            rewards,
            tiers,
        };
        store.check_users()?;

        debug!(
            dir = %store.dir.display(),
            users = store.users.len(),
            activities = store.activities.len(),
            rewards = store.rewards.len(),
            tiers = store.tiers.len(),
            "Store loaded"
        );
        Ok(store)
    }

    /// Re-read every collection from disk
    ///
    /// On failure the in-memory state is left as it was.
    pub fn reload(&mut self) -> Result<()> {
        let users = self.users.read_file()?;
        let activities = self.activities.read_file()?;
        let rewards = self.rewards.read_file()?;
        let tiers = read_tiers(&self.dir)?;
        if users.is_empty() {
            return Err(self.no_users());
        }

        self.users.replace_all(users);
        self.activities.replace_all(activities);
        self.rewards.replace_all(rewards);
        self.tiers = tiers;
        debug!(dir = %self.dir.display(), "Store reloaded");
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn users(&self) -> &Collection<User> {
        &self.users
    }

    pub fn users_mut(&mut self) -> &mut Collection<User> {
        &mut self.users
    }

    pub fn activities(&self) -> &Collection<Activity> {
        &self.activities
    }

    pub fn activities_mut(&mut self) -> &mut Collection<Activity> {
        &mut self.activities
    }

    pub fn rewards(&self) -> &Collection<Reward> {
        &self.rewards
    }

    pub fn rewards_mut(&mut self) -> &mut Collection<Reward> {
        &mut self.rewards
    }

    /// Rank ladder, easiest tier first
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn save_users(&self) -> Result<()> {
        self.users.save()
    }

    pub fn save_activities(&self) -> Result<()> {
        self.activities.save()
    }

    pub fn save_rewards(&self) -> Result<()> {
        self.rewards.save()
    }

    fn check_users(&self) -> Result<()> {
        if self.users.is_empty() {
            return Err(self.no_users());
        }
        Ok(())
    }

    fn no_users(&self) -> TrackerError {
        TrackerError::InvalidStore {
            path: self.users.path().to_path_buf(),
            reason: "at least one user is required".to_string(),
        }
    }
}

fn read_tiers(dir: &Path) -> Result<Vec<Tier>> {
    let path = dir.join(<Tier as Record>::FILE_NAME);
    let tiers: Vec<Tier> = csv_io::read_rows(&path)?;
    if tiers.is_empty() {
        return Err(TrackerError::InvalidStore {
            path,
            reason: "at least one achievement tier is required".to_string(),
        });
    }
    Ok(tiers)
}
