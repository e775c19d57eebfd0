use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::models::{Activity, Reward, Tier, User};

/// A row type backed by its own record file
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Human-readable kind, used in error messages
    const KIND: &'static str;
    const FILE_NAME: &'static str;
    const HEADERS: &'static [&'static str];

    /// The name a record is looked up by
    fn key(&self) -> &str;

    fn key_mut(&mut self) -> &mut String;

    /// Trim the name the way the file reader will when the row comes back
    fn normalize(&mut self) {
        let key = self.key_mut();
        let trimmed = key.trim();
        if trimmed.len() != key.len() {
            *key = trimmed.to_string();
        }
    }

    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

impl Record for User {
    const KIND: &'static str = "User";
    const FILE_NAME: &'static str = "users.csv";
    const HEADERS: &'static [&'static str] =
        &["name", "total_points", "activities_completed", "alltime_points"];

    fn key(&self) -> &str {
        &self.name
    }

    fn key_mut(&mut self) -> &mut String {
        &mut self.name
    }

    fn validate(&self) -> Result<()> {
        crate::models::require_name("name", &self.name).map(|_| ())
    }
}

impl Record for Activity {
    const KIND: &'static str = "Activity";
    const FILE_NAME: &'static str = "activities.csv";
    const HEADERS: &'static [&'static str] = &["activity_name", "activity_points", "daily_task"];

    fn key(&self) -> &str {
        &self.name
    }

    fn key_mut(&mut self) -> &mut String {
        &mut self.name
    }

    fn validate(&self) -> Result<()> {
        Activity::validate(self)
    }
}

impl Record for Reward {
    const KIND: &'static str = "Reward";
    const FILE_NAME: &'static str = "rewards.csv";
    const HEADERS: &'static [&'static str] = &["reward_name", "reward_price", "regular_reward"];

    fn key(&self) -> &str {
        &self.name
    }

    fn key_mut(&mut self) -> &mut String {
        &mut self.name
    }

    fn validate(&self) -> Result<()> {
        Reward::validate(self)
    }
}

impl Record for Tier {
    const KIND: &'static str = "Achievement";
    const FILE_NAME: &'static str = "achievements.csv";
    const HEADERS: &'static [&'static str] =
        &["achievement_name", "points_required", "tasks_required"];

    fn key(&self) -> &str {
        &self.name
    }

    fn key_mut(&mut self) -> &mut String {
        &mut self.name
    }
}
