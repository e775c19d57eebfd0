//! Status and achievements commands

use anyhow::Result;
use serde_json::json;

use super::Options;
use super::display::{write_achievements, write_status};

/// Show the active user's points and rank
pub fn status_command(opts: &Options, json: bool) -> Result<()> {
    let tracker = opts.open_tracker()?;

    if json {
        let user = tracker.active_user();
        let value = json!({
            "name": user.name,
            "total_points": user.total_points,
            "activities_completed": user.activities_completed,
            "alltime_points": user.alltime_points,
            "rank": tracker.current_rank(),
            "next_rank": tracker.next_rank(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    write_status(&mut std::io::stdout().lock(), &tracker)
}

/// Show every rank with its requirements and the user's standing
pub fn achievements_command(opts: &Options, json: bool) -> Result<()> {
    let tracker = opts.open_tracker()?;

    if json {
        let list = tracker.achievement_status_list();
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    write_achievements(&mut std::io::stdout().lock(), &tracker)
}
