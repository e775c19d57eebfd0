//! Text rendering shared by the menu and the one-shot commands

use std::io::Write;

use anyhow::Result;

use questlog::catalog::{Catalog, CatalogKind};
use questlog::progress::{Completion, Redemption};
use questlog::{Tracker, User};

/// Print a catalog with one running number across both groups
pub fn write_catalog(out: &mut impl Write, catalog: &Catalog) -> Result<()> {
    let (title, unit_prefix) = match catalog.kind {
        CatalogKind::Activities => ("Available Activities", "+"),
        CatalogKind::Rewards => ("Available Rewards", ""),
    };
    writeln!(out, "{title}:")?;

    if catalog.is_empty() {
        writeln!(out, "  (none yet)")?;
        return Ok(());
    }

    let mut number = 0usize;
    for group in &catalog.groups {
        writeln!(out)?;
        writeln!(out, "{}:", group.category.label())?;
        for entry in &group.entries {
            number += 1;
            writeln!(out, "{number:>3}. {} ({unit_prefix}{} points)", entry.name, entry.value)?;
        }
    }
    Ok(())
}

pub fn write_status(out: &mut impl Write, tracker: &Tracker) -> Result<()> {
    let user = tracker.active_user();
    writeln!(out, "----------------Status: {}----------------", user.name)?;
    writeln!(out, "Currently you have : {} points", user.total_points)?;
    writeln!(out, "Total Activities Completed : {}", user.activities_completed)?;
    writeln!(out, "All-time Points Earned : {}", user.alltime_points)?;
    writeln!(out, "Your current rank is: {}", tracker.current_rank())?;
    match tracker.next_rank() {
        Some(next) => writeln!(
            out,
            "Next rank: {} ({} more points OR {} more tasks, {:.0}% there)",
            next.name,
            next.points_needed,
            next.tasks_needed,
            next.progress() * 100.0
        )?,
        None => writeln!(out, "Top rank reached!")?,
    }
    writeln!(out, "----------------------------------------------")?;
    Ok(())
}

pub fn write_achievements(out: &mut impl Write, tracker: &Tracker) -> Result<()> {
    writeln!(out, "Achievement Ranks:")?;
    for (i, tier) in tracker.achievement_status_list().iter().enumerate() {
        writeln!(
            out,
            "{:>3}. {} ({} points OR {} completed tasks) [{}]",
            i + 1,
            tier.name,
            tier.points_required,
            tier.tasks_required,
            tier.status.label()
        )?;
    }
    Ok(())
}

pub fn write_users(out: &mut impl Write, tracker: &Tracker) -> Result<()> {
    let active = &tracker.active_user().name;
    writeln!(out, "Users:")?;
    for (i, user) in tracker.users().records().enumerate() {
        let marker = if &user.name == active { " *" } else { "" };
        writeln!(out, "{:>3}. {}{}", i + 1, describe_user(user), marker)?;
    }
    Ok(())
}

fn describe_user(user: &User) -> String {
    format!("{} ({} all-time pts)", user.name, user.alltime_points)
}

pub fn write_completion(out: &mut impl Write, completion: &Completion) -> Result<()> {
    writeln!(
        out,
        "Activity \"{}\" completed! You earned {} points. Total: {} points.",
        completion.activity, completion.earned, completion.balance
    )?;
    if let Some(rank_up) = completion.rank_up() {
        writeln!(out, "RANK UP! You've achieved: {}!", rank_up.new_rank.to_uppercase())?;
    }
    Ok(())
}

pub fn write_redemption(out: &mut impl Write, redemption: &Redemption) -> Result<()> {
    writeln!(
        out,
        "Reward \"{}\" successfully redeemed! You spent {} points.",
        redemption.reward, redemption.spent
    )?;
    writeln!(out, "You have {} points left.", redemption.balance)?;
    Ok(())
}
