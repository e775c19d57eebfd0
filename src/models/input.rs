//! Validation of raw field text coming from the console or dialogs

use crate::error::{Result, TrackerError};

/// Trim a name and reject it if nothing is left
pub fn require_name(field: &'static str, text: &str) -> Result<String> {
    let name = text.trim();
    if name.is_empty() {
        return Err(TrackerError::invalid(field, "must not be empty"));
    }
    Ok(name.to_string())
}

/// Parse a strictly positive whole number
pub fn parse_positive(field: &'static str, text: &str) -> Result<u64> {
    let trimmed = text.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| TrackerError::invalid(field, format!("\"{trimmed}\" is not a whole number")))?;
    if value <= 0 {
        return Err(TrackerError::invalid(field, "must be positive"));
    }
    u64::try_from(value).map_err(|_| TrackerError::invalid(field, "out of range"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positive() {
        assert_eq!(parse_positive("activity_points", " 25 ").unwrap(), 25);
        assert!(parse_positive("activity_points", "0").is_err());
        assert!(parse_positive("activity_points", "-5").is_err());
        assert!(parse_positive("activity_points", "ten").is_err());
    }

    #[test]
    fn test_require_name_trims() {
        assert_eq!(require_name("name", "  Read  ").unwrap(), "Read");
        assert!(require_name("name", "   ").is_err());
    }
}
