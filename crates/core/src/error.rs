use thiserror::Error;

/// Errors raised while normalizing a raw challenge payload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ChallengeError {
    #[error("challenge payload is missing an id")]
    MissingId,
}
