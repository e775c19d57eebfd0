use serde::{Deserialize, Serialize};

use super::bool_text;
use super::input::{parse_positive, require_name};
use super::parse_flag;
use crate::error::{Result, TrackerError};

/// Something a user can spend points on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    #[serde(rename = "reward_name")]
    pub name: String,
    #[serde(rename = "reward_price")]
    pub price: u64,
    /// Regular reward when set, long-term otherwise
    #[serde(rename = "regular_reward", with = "bool_text")]
    pub regular: bool,
}

impl Reward {
    pub fn new(name: impl Into<String>, price: u64, regular: bool) -> Self {
        Self {
            name: name.into(),
            price,
            regular,
        }
    }

    pub fn parse(name: &str, price: &str, regular: &str) -> Result<Self> {
        Ok(Self {
            name: require_name("reward_name", name)?,
            price: parse_positive("reward_price", price)?,
            regular: parse_flag("regular_reward", regular)?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(TrackerError::invalid("reward_name", "must not be empty"));
        }
        if self.price == 0 {
            return Err(TrackerError::invalid("reward_price", "must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reward() {
        let reward = Reward::parse("Movie night", "50", "no").unwrap();
        assert_eq!(reward, Reward::new("Movie night", 50, false));
    }

    #[test]
    fn test_parse_reward_rejects_negative_price() {
        let err = Reward::parse("Movie night", "-1", "yes").unwrap_err();
        assert!(err.to_string().contains("reward_price"));
    }
}
