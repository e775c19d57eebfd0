//! Rank derivation over the achievement ladder
//!
//! The ladder is walked from the easiest tier upward and the walk stops at the
//! first tier that is not met, even if a harder tier further up would be.

use serde::Serialize;

use crate::models::{Tier, User};

/// The tier a user currently holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rank<'a> {
    pub index: usize,
    pub tier: &'a Tier,
}

impl<'a> Rank<'a> {
    pub fn name(&self) -> &'a str {
        &self.tier.name
    }
}

/// Derive the current rank, or `None` for an empty ladder
///
/// Tier 0 is the fallback and is held even when its thresholds are not met.
pub fn derive_rank(
    alltime_points: u64,
    activities_completed: u64,
    tiers: &[Tier],
) -> Option<Rank<'_>> {
    let mut iter = tiers.iter().enumerate();
    let (_, first) = iter.next()?;
    let mut rank = Rank {
        index: 0,
        tier: first,
    };

    for (index, tier) in iter {
        if !tier.is_met(alltime_points, activities_completed) {
            break;
        }
        rank = Rank { index, tier };
    }

    Some(rank)
}

/// Rank for a user's counters
pub fn rank_for<'a>(user: &User, tiers: &'a [Tier]) -> Option<Rank<'a>> {
    derive_rank(user.alltime_points, user.activities_completed, tiers)
}

/// How a single tier looks from a user's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementStatus {
    Current,
    /// Thresholds met but a later tier is the current rank
    Achieved,
    Locked,
}

impl AchievementStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Current => "CURRENT RANK",
            Self::Achieved => "ACHIEVED",
            Self::Locked => "LOCKED",
        }
    }
}

/// Status of one tier given the user's current rank name
///
/// Identity is by name, so a tier sharing the current rank's name also reads
/// as current.
pub fn achievement_status(tier: &Tier, user: &User, current_rank: &str) -> AchievementStatus {
    if tier.name == current_rank {
        AchievementStatus::Current
    } else if tier.is_met(user.alltime_points, user.activities_completed) {
        AchievementStatus::Achieved
    } else {
        AchievementStatus::Locked
    }
}

/// One row of the achievements overview
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierStatus {
    pub name: String,
    pub points_required: u64,
    pub tasks_required: u64,
    pub status: AchievementStatus,
}

/// Status of every tier, in ladder order
pub fn achievement_status_list(user: &User, tiers: &[Tier]) -> Vec<TierStatus> {
    let current = rank_for(user, tiers).map(|r| r.name()).unwrap_or_default();
    tiers
        .iter()
        .map(|tier| TierStatus {
            name: tier.name.clone(),
            points_required: tier.points_required,
            tasks_required: tier.tasks_required,
            status: achievement_status(tier, user, current),
        })
        .collect()
}

/// Distance to the tier after the current one
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextRank {
    pub name: String,
    pub points_required: u64,
    pub tasks_required: u64,
    /// All-time points still needed, zero when already reached
    pub points_needed: u64,
    /// Completed activities still needed, zero when already reached
    pub tasks_needed: u64,
}

impl NextRank {
    /// Progress on the closer of the two thresholds (0.0 - 1.0)
    pub fn progress(&self) -> f32 {
        let ratio = |needed: u64, required: u64| {
            if required == 0 {
                1.0
            } else {
                1.0 - (needed as f64 / required as f64)
            }
        };
        let by_points = ratio(self.points_needed, self.points_required);
        let by_tasks = ratio(self.tasks_needed, self.tasks_required);
        by_points.max(by_tasks) as f32
    }
}

/// What the user needs for the next rank, `None` at the top of the ladder
pub fn next_rank(user: &User, tiers: &[Tier]) -> Option<NextRank> {
    let current = rank_for(user, tiers)?;
    let next = tiers.get(current.index + 1)?;
    Some(NextRank {
        name: next.name.clone(),
        points_required: next.points_required,
        tasks_required: next.tasks_required,
        points_needed: next.points_required.saturating_sub(user.alltime_points),
        tasks_needed: next.tasks_required.saturating_sub(user.activities_completed),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ladder() -> Vec<Tier> {
        vec![
            Tier::new("Beginner", 0, 0),
            Tier::new("Novice", 100, 5),
            Tier::new("Adept", 300, 15),
        ]
    }

    fn user(alltime: u64, tasks: u64) -> User {
        User {
            name: "sam".to_string(),
            total_points: alltime,
            activities_completed: tasks,
            alltime_points: alltime,
        }
    }

    #[test]
    fn test_rank_for_counters() {
        let tiers = ladder();
        assert_eq!(derive_rank(0, 0, &tiers).map(|r| r.name()), Some("Beginner"));
        assert_eq!(derive_rank(80, 4, &tiers).map(|r| r.name()), Some("Beginner"));
        assert_eq!(derive_rank(105, 4, &tiers).map(|r| r.name()), Some("Novice"));
        assert_eq!(derive_rank(0, 5, &tiers).map(|r| r.name()), Some("Novice"));
        assert_eq!(derive_rank(10_000, 0, &tiers).map(|r| r.index), Some(2));
    }

    #[test]
    fn test_empty_ladder() {
        assert!(derive_rank(50, 5, &[]).is_none());
    }

    #[test]
    fn test_tier_zero_held_when_unmet() {
        let tiers = vec![Tier::new("Starter", 10, 1), Tier::new("Next", 20, 2)];
        assert_eq!(derive_rank(0, 0, &tiers).map(|r| r.name()), Some("Starter"));
    }

    #[test]
    fn test_scan_stops_at_first_unmet_tier() {
        // Middle tier has a higher task bar than the top tier's points bar
        let tiers = vec![
            Tier::new("Beginner", 0, 0),
            Tier::new("Grinder", 1000, 50),
            Tier::new("Sprinter", 200, 100),
        ];
        assert_eq!(derive_rank(250, 10, &tiers).map(|r| r.name()), Some("Beginner"));
    }

    #[test]
    fn test_returned_tier_is_met_and_next_is_not() {
        let tiers = ladder();
        for alltime in [0, 50, 99, 100, 299, 300, 1000] {
            for tasks in [0, 4, 5, 14, 15, 40] {
                let rank = derive_rank(alltime, tasks, &tiers).unwrap();
                if rank.index > 0 {
                    assert!(rank.tier.is_met(alltime, tasks));
                }
                if let Some(next) = tiers.get(rank.index + 1) {
                    assert!(!next.is_met(alltime, tasks));
                }
            }
        }
    }

    #[test]
    fn test_status_list() {
        let tiers = ladder();
        let statuses: Vec<AchievementStatus> = achievement_status_list(&user(120, 2), &tiers)
            .into_iter()
            .map(|s| s.status)
            .collect();
        assert_eq!(
            statuses,
            vec![
                AchievementStatus::Achieved,
                AchievementStatus::Current,
                AchievementStatus::Locked
            ]
        );
    }

    #[test]
    fn test_next_rank() {
        let tiers = ladder();
        let u = user(80, 4);
        let next = next_rank(&u, &tiers).unwrap();
        assert_eq!(next.name, "Novice");
        assert_eq!(next.points_needed, 20);
        assert_eq!(next.tasks_needed, 1);
        assert!((next.progress() - 0.8).abs() < 0.01);

        assert!(next_rank(&user(300, 0), &tiers).is_none());
    }
}
