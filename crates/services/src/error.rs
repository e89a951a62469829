//! Shared error types for the services crate.

use thiserror::Error;

use quest_core::ChallengeError;

/// Errors emitted by `ChallengeSource` and the challenge API adapters.
///
/// Two buckets matter to callers: validation failures never touch the
/// network, fetch failures are surfaced immediately with no internal retry
/// so the UI can offer a manual one.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChallengeSourceError {
    #[error("challenge id must not be empty")]
    EmptyId,
    #[error("challenge request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Challenge(#[from] ChallengeError),
}

impl ChallengeSourceError {
    /// True for malformed input rejected before any network call.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyId)
    }

    /// True for network failures, non-success responses, and unusable payloads.
    #[must_use]
    pub fn is_fetch(&self) -> bool {
        !self.is_validation()
    }
}
