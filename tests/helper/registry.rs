//! Registry test utilities

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;

use updatecraft::registry::{
    ProjectVersion, Registry, RegistryError, SearchHit, SearchQuery, VersionFile, VersionQuery,
};

/// In-memory registry keyed by search query and slug
pub struct FakeRegistry {
    api_version: String,
    hits: HashMap<String, Vec<SearchHit>>,
    versions: HashMap<String, Vec<ProjectVersion>>,
    failing: HashSet<String>,
}

impl FakeRegistry {
    pub fn new() -> Self {
        Self {
            api_version: "2.7.0".to_string(),
            hits: HashMap::new(),
            versions: HashMap::new(),
            failing: HashSet::new(),
        }
    }

    pub fn with_api_version(mut self, version: &str) -> Self {
        self.api_version = version.to_string();
        self
    }

    /// Search for `query` returns exactly one hit titled `query`
    pub fn with_exact_hit(self, query: &str, slug: &str, author: &str) -> Self {
        self.with_hits(query, vec![SearchHit::new(slug, query, "MIT", author)])
    }

    pub fn with_hits(mut self, query: &str, hits: Vec<SearchHit>) -> Self {
        self.hits.insert(query.to_string(), hits);
        self
    }

    /// Adds a published build for `slug` supporting `game_versions`
    pub fn with_build(mut self, slug: &str, version_number: &str, game_versions: &[&str]) -> Self {
        let build = ProjectVersion {
            id: format!("{slug}-{version_number}"),
            name: format!("{slug} {version_number}"),
            version_number: version_number.to_string(),
            game_versions: game_versions.iter().map(|v| v.to_string()).collect(),
            loaders: vec!["fabric".to_string()],
            files: vec![VersionFile {
                url: download_url(slug, version_number),
                filename: format!("{slug}-{version_number}.jar"),
                primary: true,
            }],
        };
        self.versions.entry(slug.to_string()).or_default().push(build);
        self
    }

    /// Every version request for `slug` fails
    pub fn with_failing_versions(mut self, slug: &str) -> Self {
        self.failing.insert(slug.to_string());
        self
    }
}

pub fn download_url(slug: &str, version_number: &str) -> String {
    format!("https://cdn.example/{slug}/{version_number}.jar")
}

#[async_trait]
impl Registry for FakeRegistry {
    async fn api_version(&self) -> Result<String, RegistryError> {
        Ok(self.api_version.clone())
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchHit>, RegistryError> {
        Ok(self.hits.get(&query.query).cloned().unwrap_or_default())
    }

    async fn project_versions(
        &self,
        slug: &str,
        query: &VersionQuery,
    ) -> Result<Vec<ProjectVersion>, RegistryError> {
        if self.failing.contains(slug) {
            return Err(RegistryError::Status {
                status: 500,
                url: format!("fake://project/{slug}/version"),
            });
        }

        let builds = self.versions.get(slug).cloned().unwrap_or_default();
        Ok(builds
            .into_iter()
            .filter(|build| {
                query
                    .game_version
                    .as_ref()
                    .is_none_or(|target| build.game_versions.contains(target))
            })
            .collect())
    }
}
