//! Jikan API client.
//!
//! One GET per call: no retry, no rate limiting. Non-2xx statuses, transport
//! failures and undecodable bodies all surface as [`CatalogError`].

use super::types::*;
use crate::error::{CatalogError, Result};
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::{debug, warn};

/// Validated API root such as `https://api.jikan.moe/v4`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBase(Url);

impl ApiBase {
    pub fn parse(base_url: &str) -> Result<Self> {
        let url = Url::parse(base_url)
            .map_err(|e| CatalogError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if url.cannot_be_a_base() {
            return Err(CatalogError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self(url))
    }

    /// Append path segments to the root, keeping its own path prefix
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.0.clone();
        url.set_query(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

/// Source of list pages and single-record details
#[async_trait::async_trait]
pub trait Catalog: Send + Sync {
    /// Fetch a ranking or search page
    async fn list(&self, url: Url) -> Result<ListResponse>;

    /// Fetch a single record from its `/full` endpoint
    async fn detail(&self, url: Url) -> Result<AnimeDetail>;
}

/// Jikan API v4 client
pub struct JikanClient {
    /// HTTP client
    client: Client,
}

impl JikanClient {
    /// Create a new Jikan client
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent.to_string())
            .build()?;

        Ok(Self { client })
    }

    /// Make a GET request and decode the JSON body
    async fn get<T: serde::de::DeserializeOwned>(&self, url: &Url) -> Result<T> {
        debug!(url = %url, "Making API request");

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Request error");
            CatalogError::Transport(e)
        })?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<JikanError>(&body)
                .map(|e| e.message)
                .unwrap_or_default();
            warn!(
                url = %url,
                status = %status,
                error = %message,
                "Request failed"
            );
            return Err(CatalogError::Status {
                url: url.to_string(),
                status,
            });
        }

        serde_json::from_slice(&body).map_err(|source| {
            warn!(url = %url, error = %source, "Failed to parse response");
            CatalogError::Decode {
                url: url.to_string(),
                source,
            }
        })
    }
}

#[async_trait::async_trait]
impl Catalog for JikanClient {
    async fn list(&self, url: Url) -> Result<ListResponse> {
        let response: ListResponse = self.get(&url).await?;
        debug!(
            url = %url,
            entries = response.data.len(),
            has_next_page = response.pagination.as_ref().map(|p| p.has_next_page),
            "List page received"
        );
        Ok(response)
    }

    async fn detail(&self, url: Url) -> Result<AnimeDetail> {
        let response: DetailResponse = self.get(&url).await?;
        debug!(mal_id = response.data.mal_id, "Anime details received");
        Ok(response.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = JikanClient::new(Duration::from_secs(30), "anime-browser-test");
        assert!(client.is_ok());
    }

    #[test]
    fn test_endpoint_keeps_version_prefix() {
        let base = ApiBase::parse("https://api.jikan.moe/v4").unwrap();
        let url = base.endpoint(&["top", "anime"]);
        assert_eq!(url.as_str(), "https://api.jikan.moe/v4/top/anime");

        let slashed = ApiBase::parse("https://api.jikan.moe/v4/").unwrap();
        assert_eq!(
            slashed.endpoint(&["anime", "20", "full"]).as_str(),
            "https://api.jikan.moe/v4/anime/20/full"
        );
    }

    #[test]
    fn test_invalid_base_is_rejected() {
        assert!(matches!(
            ApiBase::parse("not a url"),
            Err(CatalogError::InvalidUrl(_))
        ));
        assert!(matches!(
            ApiBase::parse("mailto:someone@example.com"),
            Err(CatalogError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let client = JikanClient::new(Duration::from_secs(2), "anime-browser-test").unwrap();
        // Port 9 on localhost refuses connections on any sane test host
        let url = Url::parse("http://127.0.0.1:9/v4/top/anime?page=1").unwrap();
        let result = client.list(url).await;
        assert!(matches!(result, Err(CatalogError::Transport(_))));
    }
}
