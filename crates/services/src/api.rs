use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use quest_core::model::RawChallenge;

use crate::error::ChallengeSourceError;

/// Port over the remote challenge API.
///
/// `ChallengeSource` consumes this as a trait object so tests can swap in an
/// in-memory fake without a server.
#[async_trait]
pub trait ChallengeApi: Send + Sync {
    /// Fetch a single raw challenge record by id.
    async fn get_challenge(&self, id: &str) -> Result<RawChallenge, ChallengeSourceError>;

    /// Fetch raw challenge records, optionally capped at `limit`.
    async fn list_challenges(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<RawChallenge>, ChallengeSourceError>;
}

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    /// Reads `QUEST_API_BASE_URL`, falling back to the hosted API.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = env::var("QUEST_API_BASE_URL")
            .unwrap_or_else(|_| "https://api.codequest.dev".into());
        Self { base_url }
    }
}

/// `ChallengeApi` backed by the remote HTTP service.
#[derive(Clone)]
pub struct HttpChallengeApi {
    client: Client,
    base_url: String,
}

impl HttpChallengeApi {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url,
        }
    }

    #[must_use]
    pub fn from_env() -> Self {
        Self::new(ApiConfig::from_env())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }
}

/// The list endpoint answers either a bare array or a wrapped object,
/// depending on API version.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListResponse {
    Bare(Vec<RawChallenge>),
    Wrapped { challenges: Vec<RawChallenge> },
}

#[async_trait]
impl ChallengeApi for HttpChallengeApi {
    async fn get_challenge(&self, id: &str) -> Result<RawChallenge, ChallengeSourceError> {
        let response = self
            .client
            .get(self.url(&format!("/challenges/{id}")))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ChallengeSourceError::HttpStatus(response.status()));
        }

        Ok(response.json().await?)
    }

    async fn list_challenges(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<RawChallenge>, ChallengeSourceError> {
        let mut request = self.client.get(self.url("/challenges"));
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }
        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(ChallengeSourceError::HttpStatus(response.status()));
        }

        let body: ListResponse = response.json().await?;
        Ok(match body {
            ListResponse::Bare(challenges) | ListResponse::Wrapped { challenges } => challenges,
        })
    }
}
