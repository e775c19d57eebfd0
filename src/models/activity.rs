use serde::{Deserialize, Serialize};

use super::bool_text;
use super::input::{parse_positive, require_name};
use super::parse_flag;
use crate::error::{Result, TrackerError};

/// Something a user can complete to earn points
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(rename = "activity_name")]
    pub name: String,
    #[serde(rename = "activity_points")]
    pub points: u64,
    /// Daily task when set, miscellaneous otherwise
    #[serde(rename = "daily_task", with = "bool_text")]
    pub daily: bool,
}

impl Activity {
    pub fn new(name: impl Into<String>, points: u64, daily: bool) -> Self {
        Self {
            name: name.into(),
            points,
            daily,
        }
    }

    /// Build from raw text fields, as typed into a form
    pub fn parse(name: &str, points: &str, daily: &str) -> Result<Self> {
        Ok(Self {
            name: require_name("activity_name", name)?,
            points: parse_positive("activity_points", points)?,
            daily: parse_flag("daily_task", daily)?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(TrackerError::invalid("activity_name", "must not be empty"));
        }
        if self.points == 0 {
            return Err(TrackerError::invalid("activity_points", "must be positive"));
        }
        Ok(())
    }
}
