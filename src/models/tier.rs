use serde::{Deserialize, Serialize};

/// One rung of the rank ladder
///
/// A tier is met when either threshold is reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    #[serde(rename = "achievement_name")]
    pub name: String,
    pub points_required: u64,
    pub tasks_required: u64,
}

impl Tier {
    pub fn new(name: impl Into<String>, points_required: u64, tasks_required: u64) -> Self {
        Self {
            name: name.into(),
            points_required,
            tasks_required,
        }
    }

    pub fn is_met(&self, alltime_points: u64, activities_completed: u64) -> bool {
        alltime_points >= self.points_required || activities_completed >= self.tasks_required
    }
}
