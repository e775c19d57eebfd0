use std::fmt;

use serde::{Serialize, Serializer};

/// Session-scoped identifier handed out by the record store
///
/// Ids are never written to disk. A record keeps its id across reloads as long
/// as its name is unchanged. Each id carries the kind of record it was issued
/// for, so an activity id never resolves to a reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId {
    kind: &'static str,
    n: u64,
}

impl RecordId {
    pub(crate) fn new(kind: &'static str, n: u64) -> Self {
        Self { kind, n }
    }

    pub fn get(self) -> u64 {
        self.n
    }

    pub fn kind(self) -> &'static str {
        self.kind
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.n)
    }
}

// JSON output shows the bare number
impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_number_different_kind() {
        let activity = RecordId::new("Activity", 3);
        let reward = RecordId::new("Reward", 3);
        assert_ne!(activity, reward);
        assert_eq!(activity.get(), reward.get());
        assert_eq!(serde_json::to_string(&activity).unwrap(), "3");
    }
}
