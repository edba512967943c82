//! Live data source backed by an upstream REST API
//!
//! Fetches users, posts, and comments from an upstream service exposing the
//! same JSON envelopes this microservice serves. Non-success statuses are
//! surfaced as errors so the cached client can fall back to stale data.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::source::{DataSource, RawComments, RawPosts, RawUsers, SourceError};

/// Default base URL for the upstream API
const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// Client for fetching social media data from an upstream REST API
#[derive(Debug, Clone)]
pub struct RemoteSource {
    /// HTTP client for making requests
    http_client: Client,
    /// Base URL for the API (allows override for testing)
    base_url: String,
}

impl Default for RemoteSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteSource {
    /// Creates a new RemoteSource against the default upstream
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a new RemoteSource with a custom base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Performs a GET against `base_url` + `path` and decodes the JSON body
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, SourceError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self.http_client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status));
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl DataSource for RemoteSource {
    async fn fetch_users(&self) -> Result<RawUsers, SourceError> {
        self.get_json("/users").await
    }

    async fn fetch_user_posts(&self, user_id: &str) -> Result<RawPosts, SourceError> {
        self.get_json(&format!("/users/{}/posts", user_id)).await
    }

    async fn fetch_post_comments(&self, post_id: u64) -> Result<RawComments, SourceError> {
        self.get_json(&format!("/posts/{}/comments", post_id)).await
    }
}
