//! Local mod identity types

use std::fmt;

/// Mod-loading framework a mod targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Loader {
    Fabric,
    Quilt,
}

impl Loader {
    /// Tag used by the registry for loader filters and facets
    pub fn as_str(&self) -> &'static str {
        match self {
            Loader::Fabric => "fabric",
            Loader::Quilt => "quilt",
        }
    }
}

impl fmt::Display for Loader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity read from a mod archive's manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalMod {
    pub name: String,
    pub version: String,
    pub loader: Loader,
    /// May be empty; empty licenses are not scored
    pub license: String,
    pub authors: Vec<String>,
}

impl LocalMod {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        loader: Loader,
        license: impl Into<String>,
        authors: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            loader,
            license: license.into(),
            authors,
        }
    }

    pub fn has_author(&self, author: &str) -> bool {
        self.authors.iter().any(|a| a == author)
    }
}
