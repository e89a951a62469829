use std::sync::Arc;

use tracing::{debug, warn};

use quest_core::model::Challenge;

use crate::api::ChallengeApi;
use crate::error::ChallengeSourceError;

/// Options for bulk fetches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions {
    pub limit: Option<u32>,
}

impl FetchOptions {
    #[must_use]
    pub fn with_limit(limit: u32) -> Self {
        Self { limit: Some(limit) }
    }
}

/// Hides remote-API shape drift behind the normalized [`Challenge`] schema.
///
/// One attempt per call, no caching, no internal retry; failures surface
/// immediately so the UI can offer a manual retry. The consumer is expected
/// to disable its trigger while a fetch for the same id is outstanding.
#[derive(Clone)]
pub struct ChallengeSource {
    api: Arc<dyn ChallengeApi>,
}

impl ChallengeSource {
    #[must_use]
    pub fn new(api: Arc<dyn ChallengeApi>) -> Self {
        Self { api }
    }

    /// Fetch and normalize a single challenge.
    ///
    /// # Errors
    ///
    /// Returns `ChallengeSourceError::EmptyId` for a blank id, before any
    /// network call. Returns fetch errors for transport failures,
    /// non-success responses, and payloads with no usable id.
    pub async fn fetch_by_id(&self, id: &str) -> Result<Challenge, ChallengeSourceError> {
        if id.trim().is_empty() {
            return Err(ChallengeSourceError::EmptyId);
        }

        debug!(challenge_id = %id, "fetching challenge");
        let raw = self.api.get_challenge(id).await.inspect_err(|err| {
            warn!(challenge_id = %id, error = %err, "challenge fetch failed");
        })?;

        Ok(Challenge::normalize(raw)?)
    }

    /// Fetch and normalize challenges in bulk.
    ///
    /// All-or-nothing: a failure on the request or on any element fails the
    /// whole call with no partial results. Output order matches the remote
    /// response order.
    ///
    /// # Errors
    ///
    /// Returns fetch errors for transport failures, non-success responses,
    /// and elements with no usable id.
    pub async fn fetch_all(
        &self,
        options: FetchOptions,
    ) -> Result<Vec<Challenge>, ChallengeSourceError> {
        debug!(limit = ?options.limit, "fetching challenge list");
        let raw = self
            .api
            .list_challenges(options.limit)
            .await
            .inspect_err(|err| {
                warn!(error = %err, "challenge list fetch failed");
            })?;

        raw.into_iter()
            .map(|record| Challenge::normalize(record).map_err(ChallengeSourceError::from))
            .collect()
    }
}
