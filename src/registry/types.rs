//! Registry payload and query types

use serde::Deserialize;

use crate::local::Loader;

/// Project type facet applied to every search
pub const MOD_PROJECT_FACET: &str = "project_type:mod";

/// One search hit, a candidate identity for a local mod
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SearchHit {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub license: String,
    #[serde(default)]
    pub author: String,
    /// Remaining fields as returned by the registry
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SearchHit {
    pub fn new(slug: &str, title: &str, license: &str, author: &str) -> Self {
        Self {
            slug: slug.to_string(),
            title: title.to_string(),
            license: license.to_string(),
            author: author.to_string(),
            extra: serde_json::Map::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub hits: Vec<SearchHit>,
}

/// A published build of a project
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ProjectVersion {
    pub id: String,
    pub name: String,
    pub version_number: String,
    #[serde(default)]
    pub game_versions: Vec<String>,
    #[serde(default)]
    pub loaders: Vec<String>,
    #[serde(default)]
    pub files: Vec<VersionFile>,
}

/// A downloadable artifact of a published build
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct VersionFile {
    pub url: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub primary: bool,
}

/// Search parameters for identifying a local mod
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub query: String,
    pub loader: Loader,
    pub limit: u32,
}

impl SearchQuery {
    /// Facet groups: mod projects, then the loader category
    pub fn facets(&self) -> Vec<Vec<String>> {
        vec![
            vec![MOD_PROJECT_FACET.to_string()],
            vec![format!("categories:{}", self.loader)],
        ]
    }
}

/// Filters for listing a project's published versions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionQuery {
    pub loader: Loader,
    pub game_version: Option<String>,
}

impl VersionQuery {
    pub fn for_loader(loader: Loader) -> Self {
        Self {
            loader,
            game_version: None,
        }
    }

    pub fn for_game_version(loader: Loader, game_version: &str) -> Self {
        Self {
            loader,
            game_version: Some(game_version.to_string()),
        }
    }
}
