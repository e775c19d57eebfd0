use serde::{Deserialize, Serialize};

/// A person collecting points
///
/// `total_points` is the spendable balance. `alltime_points` only ever grows
/// and drives rank derivation together with `activities_completed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub total_points: u64,
    pub activities_completed: u64,
    pub alltime_points: u64,
}

impl User {
    /// A fresh user with every counter at zero
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            total_points: 0,
            activities_completed: 0,
            alltime_points: 0,
        }
    }
}
