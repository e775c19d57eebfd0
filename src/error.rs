//! Error type shared by the store, engines, and session

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Everything that can go wrong while tracking progress
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Required data file not found: {}", path.display())]
    MissingStore { path: PathBuf },

    #[error("Failed to parse {}: {source}", path.display())]
    MalformedStore {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid data in {}: {reason}", path.display())]
    InvalidStore { path: PathBuf, reason: String },

    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not enough points to redeem \"{reward}\": need {required}, have {available}")]
    InsufficientPoints {
        reward: String,
        required: u64,
        available: u64,
    },

    #[error("Cannot delete \"{name}\": it is the last user")]
    LastUser { name: String },

    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("{kind} \"{name}\" already exists")]
    AlreadyExists { kind: &'static str, name: String },

    #[error("{kind} {key} not found")]
    NotFound { kind: &'static str, key: String },
}

impl TrackerError {
    /// Points still missing for an `InsufficientPoints` failure
    pub fn shortfall(&self) -> Option<u64> {
        match self {
            Self::InsufficientPoints {
                required,
                available,
                ..
            } => Some(required.saturating_sub(*available)),
            _ => None,
        }
    }

    /// Whether the session cannot continue after this error
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::MissingStore { .. } | Self::MalformedStore { .. } | Self::InvalidStore { .. }
        )
    }

    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortfall_only_for_insufficient_points() {
        let err = TrackerError::InsufficientPoints {
            reward: "Movie night".to_string(),
            required: 50,
            available: 30,
        };
        assert_eq!(err.shortfall(), Some(20));
        assert!(!err.is_fatal());

        let err = TrackerError::LastUser {
            name: "alex".to_string(),
        };
        assert_eq!(err.shortfall(), None);
    }

    #[test]
    fn test_missing_store_is_fatal() {
        let err = TrackerError::MissingStore {
            path: PathBuf::from("users.csv"),
        };
        assert!(err.is_fatal());
        assert!(err.to_string().contains("users.csv"));
    }
}
