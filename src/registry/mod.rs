//! Remote mod registry access
//!
//! # Modules
//!
//! - [`types`]: search hits, published versions and query parameters
//! - [`modrinth`]: Modrinth v2 API client
//! - [`error`]: transport and response errors

#[cfg(test)]
use mockall::automock;

pub mod error;
pub mod modrinth;
pub mod types;

pub use error::RegistryError;
pub use modrinth::ModrinthRegistry;
pub use types::{ProjectVersion, SearchHit, SearchQuery, VersionFile, VersionQuery};

/// Trait for talking to a remote mod registry
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    /// Version string reported by the registry API root
    async fn api_version(&self) -> Result<String, RegistryError>;

    /// Full-text project search
    ///
    /// # Returns
    /// * `Ok(Vec<SearchHit>)` - Hits in registry relevance order, possibly empty
    /// * `Err(RegistryError)` - If the request fails
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchHit>, RegistryError>;

    /// Published versions of a project, filtered by loader and optionally game version
    ///
    /// # Returns
    /// * `Ok(Vec<ProjectVersion>)` - Versions in registry order (newest first)
    /// * `Err(RegistryError)` - If the request fails
    async fn project_versions(
        &self,
        slug: &str,
        query: &VersionQuery,
    ) -> Result<Vec<ProjectVersion>, RegistryError>;
}
