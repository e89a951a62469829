use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a Challenge.
///
/// Remote ids are opaque strings (the API uses Mongo-style object ids);
/// nothing is assumed about their shape beyond being non-empty, which the
/// normalization boundary enforces.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChallengeId(String);

impl ChallengeId {
    /// Creates a new `ChallengeId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the underlying string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ChallengeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChallengeId({})", self.0)
    }
}

impl fmt::Display for ChallengeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_shows_raw_id() {
        let id = ChallengeId::new("6650f2a1");
        assert_eq!(id.to_string(), "6650f2a1");
        assert_eq!(id.as_str(), "6650f2a1");
    }
}
