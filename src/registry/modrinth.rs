//! Modrinth v2 API registry implementation

use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::{Config, RetryConfig};
use crate::registry::Registry;
use crate::registry::error::RegistryError;
use crate::registry::types::{
    ProjectVersion, SearchHit, SearchQuery, SearchResponse, VersionQuery,
};

/// Response from the API root
#[derive(Debug, Deserialize)]
struct ApiInfo {
    version: Option<serde_json::Value>,
}

/// Registry implementation for the Modrinth API
pub struct ModrinthRegistry {
    client: reqwest::Client,
    base_url: String,
    check_url: String,
    retry: RetryConfig,
}

impl ModrinthRegistry {
    /// Creates a new ModrinthRegistry against custom endpoints
    pub fn new(base_url: &str, check_url: &str, user_agent: &str, retry: RetryConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            check_url: check_url.to_string(),
            retry,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.api_base_url,
            &config.api_check_url,
            &config.user_agent,
            config.retry,
        )
    }

    fn url(&self, path: &str, params: &[(&str, String)]) -> Result<Url, RegistryError> {
        let raw = format!("{}/{}", self.base_url, path);
        Url::parse_with_params(&raw, params).map_err(|e| RegistryError::InvalidUrl(e.to_string()))
    }

    /// Sends a GET request, retrying failed attempts with a fixed delay.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, RegistryError> {
        let mut remaining = self.retry.attempts;
        let response = loop {
            match self.send(&url).await {
                Ok(response) => break response,
                Err(e) if remaining > 0 => {
                    debug!(
                        "Retrying {} in {}ms ({} attempts left): {}",
                        url, self.retry.delay_ms, remaining, e
                    );
                    remaining -= 1;
                    sleep(Duration::from_millis(self.retry.delay_ms)).await;
                }
                Err(e) => return Err(e),
            }
        };

        response.json::<T>().await.map_err(|e| {
            warn!("Failed to parse Modrinth response from {}: {}", url, e);
            RegistryError::InvalidResponse(e.to_string())
        })
    }

    async fn send(&self, url: &Url) -> Result<reqwest::Response, RegistryError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            debug!("Request to {} failed with code {}", url, status);
            debug!("Response headers: {:?}", response.headers());
            return Err(RegistryError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response)
    }
}

impl Default for ModrinthRegistry {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// JSON-encoded list parameter, e.g. `["fabric"]`
fn json_list(values: &[&str]) -> String {
    serde_json::to_string(values).unwrap_or_default()
}

#[async_trait::async_trait]
impl Registry for ModrinthRegistry {
    async fn api_version(&self) -> Result<String, RegistryError> {
        let url = Url::parse(&self.check_url).map_err(|e| RegistryError::InvalidUrl(e.to_string()))?;
        let info: ApiInfo = self.get_json(url).await?;

        match info.version {
            Some(serde_json::Value::String(version)) => Ok(version),
            Some(other) => Ok(other.to_string()),
            None => Err(RegistryError::InvalidResponse(
                "Bad API response format".to_string(),
            )),
        }
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchHit>, RegistryError> {
        let facets = serde_json::to_string(&query.facets()).unwrap_or_default();
        let url = self.url(
            "search",
            &[
                ("query", query.query.clone()),
                ("facets", facets),
                ("limit", query.limit.to_string()),
            ],
        )?;
        debug!("Searching Modrinth: {}", url);

        let response: SearchResponse = self.get_json(url).await?;
        debug!(
            "Found {} hits for search {}",
            response.hits.len(),
            query.query
        );
        Ok(response.hits)
    }

    async fn project_versions(
        &self,
        slug: &str,
        query: &VersionQuery,
    ) -> Result<Vec<ProjectVersion>, RegistryError> {
        let mut params = vec![("loaders", json_list(&[query.loader.as_str()]))];
        if let Some(game_version) = &query.game_version {
            params.push(("game_versions", json_list(&[game_version.as_str()])));
        }
        let url = self.url(&format!("project/{slug}/version"), &params)?;
        debug!("Fetching Modrinth versions: {}", url);

        self.get_json(url).await
    }
}
