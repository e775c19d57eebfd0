//! Points, completions, redemptions, and ranks

mod engine;
mod rank;

pub use engine::{Completion, RankUp, Redemption, complete_activity, redeem_reward};
pub use rank::{
    AchievementStatus, NextRank, Rank, TierStatus, achievement_status, achievement_status_list,
    derive_rank, next_rank, rank_for,
};
