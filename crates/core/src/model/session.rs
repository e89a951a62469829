use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ChallengeId;

/// Practice mode chosen before a session is launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PracticeMode {
    Solo,
    Timed,
    Team,
}

/// Value handed to the begin callback when a countdown completes.
///
/// `started_at` comes from the launcher's injected clock so launch times
/// stay deterministic under test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTicket {
    pub challenge_id: ChallengeId,
    pub mode: PracticeMode,
    pub started_at: DateTime<Utc>,
}

impl SessionTicket {
    #[must_use]
    pub fn new(challenge_id: ChallengeId, mode: PracticeMode, started_at: DateTime<Utc>) -> Self {
        Self {
            challenge_id,
            mode,
            started_at,
        }
    }
}
