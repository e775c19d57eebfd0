//! Application context: the store plus the active user
//!
//! The active user is a working copy. Completions and redemptions change only
//! that copy until [`Tracker::save_active_user`] writes it back. A
//! [`Tracker::reload`] keeps it unless the user's row has left the file.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::catalog::{Catalog, CatalogKind};
use crate::error::{Result, TrackerError};
use crate::models::{Activity, RecordId, Reward, User, require_name};
use crate::progress::{self, Completion, NextRank, Redemption, TierStatus};
use crate::store::{Collection, Record, Store};

/// New or replacement values for a catalog record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordFields {
    Activity(Activity),
    Reward(Reward),
}

impl RecordFields {
    pub fn kind(&self) -> CatalogKind {
        match self {
            Self::Activity(_) => CatalogKind::Activities,
            Self::Reward(_) => CatalogKind::Rewards,
        }
    }
}

pub struct Tracker {
    store: Store,
    active: User,
}

impl Tracker {
    /// Load the data directory and pick the active user
    ///
    /// `preferred_user` falls back to the first user when absent or unknown.
    pub fn open(dir: impl Into<PathBuf>, preferred_user: Option<&str>) -> Result<Self> {
        let store = Store::load(dir)?;
        Self::with_store(store, preferred_user)
    }

    pub fn with_store(store: Store, preferred_user: Option<&str>) -> Result<Self> {
        let preferred = preferred_user.and_then(|name| {
            let found = store.users().find(name).map(|(_, u)| u.clone());
            if found.is_none() {
                warn!(user = name, "Preferred user not found, using the first user");
            }
            found
        });

        let active = match preferred {
            Some(user) => user,
            None => first_user(store.users())?,
        };

        info!(user = %active.name, "Active user");
        Ok(Self { store, active })
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn active_user(&self) -> &User {
        &self.active
    }

    pub fn users(&self) -> &Collection<User> {
        self.store.users()
    }

    /// Re-read every file, keeping the active user's unsaved progress
    ///
    /// If the active user's row is gone from the file, the first user becomes
    /// active, as after deleting the active user.
    pub fn reload(&mut self) -> Result<()> {
        self.store.reload()?;
        if self.store.users().find(&self.active.name).is_none() {
            warn!(user = %self.active.name, "Active user no longer in users file");
            self.active = first_user(self.store.users())?;
            info!(user = %self.active.name, "Active user reset");
        }
        Ok(())
    }

    /// Write the active user's counters back to the users file
    pub fn save_active_user(&mut self) -> Result<()> {
        let (id, _) = self
            .store
            .users()
            .find(&self.active.name)
            .ok_or_else(|| TrackerError::NotFound {
                kind: <User as Record>::KIND,
                key: self.active.name.clone(),
            })?;
        self.store.users_mut().replace(id, self.active.clone())?;
        info!(user = %self.active.name, "Progress saved");
        Ok(())
    }

    // ========================================
    // CATALOGS
    // ========================================

    pub fn list_catalog(&self, kind: CatalogKind) -> Catalog {
        match kind {
            CatalogKind::Activities => Catalog::build(self.store.activities()),
            CatalogKind::Rewards => Catalog::build(self.store.rewards()),
        }
    }

    /// Look up a record id by exact name
    pub fn resolve_selection(&self, kind: CatalogKind, name: &str) -> Option<RecordId> {
        match kind {
            CatalogKind::Activities => self.store.activities().find(name).map(|(id, _)| id),
            CatalogKind::Rewards => self.store.rewards().find(name).map(|(id, _)| id),
        }
    }

    // ========================================
    // PROGRESS
    // ========================================

    pub fn complete_activity(&mut self, id: RecordId) -> Result<Completion> {
        let activity = lookup(self.store.activities(), id)?.clone();
        let completion = progress::complete_activity(&mut self.active, &activity, self.store.tiers());
        info!(
            user = %self.active.name,
            activity = %completion.activity,
            earned = completion.earned,
            "Activity completed"
        );
        Ok(completion)
    }

    pub fn redeem_reward(&mut self, id: RecordId) -> Result<Redemption> {
        let reward = lookup(self.store.rewards(), id)?.clone();
        let redemption = progress::redeem_reward(&mut self.active, &reward)?;
        info!(
            user = %self.active.name,
            reward = %redemption.reward,
            spent = redemption.spent,
            "Reward redeemed"
        );
        Ok(redemption)
    }

    pub fn current_rank(&self) -> &str {
        progress::rank_for(&self.active, self.store.tiers())
            .map(|r| r.name())
            .unwrap_or_default()
    }

    pub fn achievement_status_list(&self) -> Vec<TierStatus> {
        progress::achievement_status_list(&self.active, self.store.tiers())
    }

    pub fn next_rank(&self) -> Option<NextRank> {
        progress::next_rank(&self.active, self.store.tiers())
    }

    // ========================================
    // RECORD MANAGEMENT
    // ========================================

    pub fn add_record(&mut self, fields: RecordFields) -> Result<RecordId> {
        let id = match fields {
            RecordFields::Activity(activity) => self.store.activities_mut().append(activity)?,
            RecordFields::Reward(reward) => self.store.rewards_mut().append(reward)?,
        };
        Ok(id)
    }

    pub fn edit_record(&mut self, id: RecordId, fields: RecordFields) -> Result<()> {
        match fields {
            RecordFields::Activity(activity) => {
                self.store.activities_mut().replace(id, activity)?;
            }
            RecordFields::Reward(reward) => {
                self.store.rewards_mut().replace(id, reward)?;
            }
        }
        Ok(())
    }

    pub fn delete_record(&mut self, kind: CatalogKind, id: RecordId) -> Result<()> {
        let name = match kind {
            CatalogKind::Activities => self.store.activities_mut().remove(id)?.name,
            CatalogKind::Rewards => self.store.rewards_mut().remove(id)?.name,
        };
        info!(?kind, %name, "Record deleted");
        Ok(())
    }

    // ========================================
    // USERS
    // ========================================

    /// Save the current user, then make `name` active
    pub fn switch_user(&mut self, name: &str) -> Result<()> {
        let not_found = || TrackerError::NotFound {
            kind: <User as Record>::KIND,
            key: name.to_string(),
        };
        if self.store.users().find(name).is_none() {
            return Err(not_found());
        }

        self.save_active_user()?;
        // read after saving so switching to oneself keeps the fresh counters
        self.active = self
            .store
            .users()
            .find(name)
            .map(|(_, u)| u.clone())
            .ok_or_else(not_found)?;
        info!(user = %self.active.name, "Switched user");
        Ok(())
    }

    pub fn add_user(&mut self, name: &str) -> Result<RecordId> {
        let name = require_name("name", name)?;
        let id = self.store.users_mut().append(User::new(name.clone()))?;
        info!(user = %name, "User added");
        Ok(id)
    }

    /// Delete a user; the last remaining user can never be deleted
    ///
    /// Deleting the active user makes the first remaining user active.
    pub fn delete_user(&mut self, name: &str) -> Result<()> {
        let (id, _) = self
            .store
            .users()
            .find(name)
            .ok_or_else(|| TrackerError::NotFound {
                kind: <User as Record>::KIND,
                key: name.to_string(),
            })?;

        if self.store.users().len() <= 1 {
            return Err(TrackerError::LastUser {
                name: name.to_string(),
            });
        }

        self.store.users_mut().remove(id)?;
        info!(user = name, "User deleted");

        if self.active.name == name {
            self.active = first_user(self.store.users())?;
            info!(user = %self.active.name, "Active user reset");
        }

        // The delete is already on disk; a failed re-read leaves the in-memory state
        if let Err(e) = self.reload() {
            warn!(error = %e, "Reload after deleting a user failed");
        }
        Ok(())
    }
}

fn first_user(users: &Collection<User>) -> Result<User> {
    users
        .first()
        .map(|(_, u)| u.clone())
        .ok_or_else(|| TrackerError::InvalidStore {
            path: users.path().to_path_buf(),
            reason: "at least one user is required".to_string(),
        })
}

fn lookup<T: Record>(collection: &Collection<T>, id: RecordId) -> Result<&T> {
    collection.get(id).ok_or_else(|| TrackerError::NotFound {
        kind: T::KIND,
        key: id.to_string(),
    })
}
