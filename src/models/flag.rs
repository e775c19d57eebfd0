//! Boolean category flags as they appear in record files and console input

use crate::error::{Result, TrackerError};

/// Parse a yes/no answer typed by the user
///
/// Accepts `yes`, `y`, `true`, `1` and `no`, `n`, `false`, `0` in any case.
pub fn parse_flag(field: &'static str, text: &str) -> Result<bool> {
    match text.trim().to_lowercase().as_str() {
        "yes" | "y" | "true" | "1" => Ok(true),
        "no" | "n" | "false" | "0" => Ok(false),
        other => Err(TrackerError::invalid(
            field,
            format!("expected yes or no, got \"{other}\""),
        )),
    }
}

/// Serde adapter writing `True`/`False` and reading any form `parse_flag` accepts
pub(crate) mod bool_text {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "True" } else { "False" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::parse_flag("flag", &text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag_accepts_common_answers() {
        assert!(parse_flag("daily_task", "yes").unwrap());
        assert!(parse_flag("daily_task", " Y ").unwrap());
        assert!(parse_flag("daily_task", "True").unwrap());
        assert!(!parse_flag("daily_task", "no").unwrap());
        assert!(!parse_flag("daily_task", "FALSE").unwrap());
        assert!(!parse_flag("daily_task", "0").unwrap());
    }

    #[test]
    fn test_parse_flag_rejects_other_text() {
        let err = parse_flag("regular_reward", "maybe").unwrap_err();
        assert!(matches!(
            err,
            TrackerError::InvalidInput {
                field: "regular_reward",
                ..
            }
        ));
    }
}
