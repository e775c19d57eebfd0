//! Applying completions and redemptions to a user's counters

use serde::Serialize;
use tracing::info;

use super::rank::rank_for;
use crate::error::{Result, TrackerError};
use crate::models::{Activity, Reward, Tier, User};

/// A rank change caused by a completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankUp {
    pub old_rank: String,
    pub new_rank: String,
}

/// Result of completing an activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub activity: String,
    pub earned: u64,
    /// Spendable balance afterwards
    pub balance: u64,
    pub rank_before: String,
    pub rank_after: String,
}

impl Completion {
    pub fn rank_up(&self) -> Option<RankUp> {
        (self.rank_before != self.rank_after).then(|| RankUp {
            old_rank: self.rank_before.clone(),
            new_rank: self.rank_after.clone(),
        })
    }
}

/// Result of redeeming a reward
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redemption {
    pub reward: String,
    pub spent: u64,
    pub balance: u64,
}

fn rank_name(user: &User, tiers: &[Tier]) -> String {
    rank_for(user, tiers)
        .map(|r| r.name().to_string())
        .unwrap_or_default()
}

/// Credit an activity to the user
///
/// Always succeeds. Balance and all-time points both grow by the activity's
/// points and the completion counter by one.
pub fn complete_activity(user: &mut User, activity: &Activity, tiers: &[Tier]) -> Completion {
    let rank_before = rank_name(user, tiers);

    user.total_points = user.total_points.saturating_add(activity.points);
    user.alltime_points = user.alltime_points.saturating_add(activity.points);
    user.activities_completed = user.activities_completed.saturating_add(1);

    let rank_after = rank_name(user, tiers);
    if rank_before != rank_after {
        info!(user = %user.name, from = %rank_before, to = %rank_after, "Rank up");
    }

    Completion {
        activity: activity.name.clone(),
        earned: activity.points,
        balance: user.total_points,
        rank_before,
        rank_after,
    }
}

/// Spend points on a reward
///
/// Leaves the user untouched when the balance is too low.
pub fn redeem_reward(user: &mut User, reward: &Reward) -> Result<Redemption> {
    if user.total_points < reward.price {
        return Err(TrackerError::InsufficientPoints {
            reward: reward.name.clone(),
            required: reward.price,
            available: user.total_points,
        });
    }

    user.total_points -= reward.price;

    Ok(Redemption {
        reward: reward.name.clone(),
        spent: reward.price,
        balance: user.total_points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ladder() -> Vec<Tier> {
        vec![Tier::new("Beginner", 0, 0), Tier::new("Novice", 100, 5)]
    }

    #[test]
    fn test_completion_flips_rank() {
        let tiers = ladder();
        let mut user = User {
            name: "sam".to_string(),
            total_points: 80,
            activities_completed: 4,
            alltime_points: 80,
        };

        let completion = complete_activity(&mut user, &Activity::new("Gym", 25, true), &tiers);

        assert_eq!(user.total_points, 105);
        assert_eq!(user.alltime_points, 105);
        assert_eq!(user.activities_completed, 5);
        assert_eq!(completion.balance, 105);
        assert_eq!(
            completion.rank_up(),
            Some(RankUp {
                old_rank: "Beginner".to_string(),
                new_rank: "Novice".to_string()
            })
        );
    }

    #[test]
    fn test_completion_without_rank_change() {
        let tiers = ladder();
        let mut user = User::new("sam");
        let completion = complete_activity(&mut user, &Activity::new("Read", 10, false), &tiers);
        assert!(completion.rank_up().is_none());
        assert_eq!(completion.rank_after, "Beginner");
    }

    #[test]
    fn test_redeem_insufficient_points() {
        let mut user = User::new("sam");
        user.total_points = 30;
        user.alltime_points = 30;

        let err = redeem_reward(&mut user, &Reward::new("Movie", 50, true)).unwrap_err();

        assert_eq!(err.shortfall(), Some(20));
        assert_eq!(user.total_points, 30);
    }

    #[test]
    fn test_redeem_spends_balance_only() {
        let mut user = User {
            name: "sam".to_string(),
            total_points: 60,
            activities_completed: 3,
            alltime_points: 200,
        };

        let redemption = redeem_reward(&mut user, &Reward::new("Movie", 50, true)).unwrap();

        assert_eq!(redemption.balance, 10);
        assert_eq!(user.total_points, 10);
        assert_eq!(user.alltime_points, 200);
        assert_eq!(user.activities_completed, 3);
    }

    #[test]
    fn test_redeem_exact_balance() {
        let mut user = User::new("sam");
        user.total_points = 50;
        assert!(redeem_reward(&mut user, &Reward::new("Movie", 50, true)).is_ok());
        assert_eq!(user.total_points, 0);
    }
}
