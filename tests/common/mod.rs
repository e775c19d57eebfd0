//! Shared fixtures for tracker integration tests

use std::fs;
use std::path::Path;

use tempfile::TempDir;

pub const USERS: &str = "\
name,total_points,activities_completed,alltime_points
alex,30,4,80
sam,0,0,0
";

pub const ACTIVITIES: &str = "\
activity_name,activity_points,daily_task
Morning run,25,True
Read a chapter,10,True
Clean garage,40,False
";

pub const REWARDS: &str = "\
reward_name,reward_price,regular_reward
Movie night,50,True
Coffee,20,True
New headphones,500,False
";

pub const ACHIEVEMENTS: &str = "\
achievement_name,points_required,tasks_required
Beginner,0,0
Novice,100,5
Apprentice,300,15
";

/// Creates a data directory holding the four record files
pub fn create_data_dir() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_file(temp_dir.path(), "users.csv", USERS);
    write_file(temp_dir.path(), "activities.csv", ACTIVITIES);
    write_file(temp_dir.path(), "rewards.csv", REWARDS);
    write_file(temp_dir.path(), "achievements.csv", ACHIEVEMENTS);
    temp_dir
}

pub fn write_file(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).expect("Failed to write data file");
}

pub fn read_file(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).expect("Failed to read data file")
}
