//! Loader manifest parsers

use indexmap::IndexMap;
use serde::Deserialize;

use crate::local::types::{Loader, LocalMod};

/// License recorded when a manifest does not declare one
pub const DEFAULT_LICENSE: &str = "license";

/// Trait for reading one loader's manifest out of a mod archive
pub trait ManifestReader: Send + Sync {
    /// Loader tag assigned to mods read by this reader
    fn loader(&self) -> Loader;

    /// Archive entry holding the manifest
    fn entry_name(&self) -> &'static str;

    /// Parse the manifest bytes into a `LocalMod`
    fn parse(&self, bytes: &[u8]) -> Result<LocalMod, serde_json::Error>;
}

/// A string or a list of strings
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn first(self) -> Option<String> {
        match self {
            OneOrMany::One(value) => Some(value),
            OneOrMany::Many(values) => values.into_iter().next(),
        }
    }
}

/// Fabric person entry: plain name or `{ "name": ..., "contact": ... }`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FabricPerson {
    Name(String),
    Detailed { name: String },
}

impl FabricPerson {
    fn into_name(self) -> String {
        match self {
            FabricPerson::Name(name) | FabricPerson::Detailed { name } => name,
        }
    }
}

#[derive(Debug, Deserialize)]
struct FabricManifest {
    name: String,
    version: String,
    #[serde(default)]
    license: Option<OneOrMany>,
    #[serde(default)]
    authors: Vec<FabricPerson>,
}

/// Reader for `fabric.mod.json`
#[derive(Debug, Default, Clone, Copy)]
pub struct FabricManifestReader;

impl ManifestReader for FabricManifestReader {
    fn loader(&self) -> Loader {
        Loader::Fabric
    }

    fn entry_name(&self) -> &'static str {
        "fabric.mod.json"
    }

    fn parse(&self, bytes: &[u8]) -> Result<LocalMod, serde_json::Error> {
        let manifest: FabricManifest = serde_json::from_slice(bytes)?;
        let license = manifest
            .license
            .and_then(OneOrMany::first)
            .unwrap_or_else(|| DEFAULT_LICENSE.to_string());
        let authors = manifest
            .authors
            .into_iter()
            .map(FabricPerson::into_name)
            .collect();

        Ok(LocalMod::new(
            manifest.name,
            manifest.version,
            self.loader(),
            license,
            authors,
        ))
    }
}

/// Quilt license: SPDX id, detailed object, or a list of either
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QuiltLicense {
    Id(String),
    Detailed { id: String },
    Many(Vec<QuiltLicense>),
}

impl QuiltLicense {
    fn first(self) -> Option<String> {
        match self {
            QuiltLicense::Id(id) | QuiltLicense::Detailed { id } => Some(id),
            QuiltLicense::Many(licenses) => licenses.into_iter().find_map(QuiltLicense::first),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct QuiltMetadata {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    license: Option<QuiltLicense>,
    /// Contributor name -> role
    #[serde(default)]
    contributors: IndexMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct QuiltLoaderSection {
    id: String,
    version: String,
    #[serde(default)]
    metadata: QuiltMetadata,
}

#[derive(Debug, Deserialize)]
struct QuiltManifest {
    quilt_loader: QuiltLoaderSection,
}

/// Reader for `quilt.mod.json`
#[derive(Debug, Default, Clone, Copy)]
pub struct QuiltManifestReader;

impl ManifestReader for QuiltManifestReader {
    fn loader(&self) -> Loader {
        Loader::Quilt
    }

    fn entry_name(&self) -> &'static str {
        "quilt.mod.json"
    }

    fn parse(&self, bytes: &[u8]) -> Result<LocalMod, serde_json::Error> {
        let manifest: QuiltManifest = serde_json::from_slice(bytes)?;
        let section = manifest.quilt_loader;
        let metadata = section.metadata;

        let name = metadata.name.unwrap_or(section.id);
        let license = metadata
            .license
            .and_then(QuiltLicense::first)
            .unwrap_or_else(|| DEFAULT_LICENSE.to_string());
        let authors = metadata.contributors.into_keys().collect();

        Ok(LocalMod::new(
            name,
            section.version,
            self.loader(),
            license,
            authors,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fabric_parses_required_and_optional_fields() {
        let json = br#"{
            "schemaVersion": 1,
            "id": "sodium",
            "name": "Sodium",
            "version": "0.5.8+mc1.20.4",
            "license": "LGPL-3.0-only",
            "authors": ["JellySquid", {"name": "IMS", "contact": {}}]
        }"#;

        let result = FabricManifestReader.parse(json).unwrap();

        assert_eq!(
            result,
            LocalMod::new(
                "Sodium",
                "0.5.8+mc1.20.4",
                Loader::Fabric,
                "LGPL-3.0-only",
                vec!["JellySquid".to_string(), "IMS".to_string()],
            )
        );
    }

    #[test]
    fn fabric_uses_placeholder_license_and_no_authors_when_absent() {
        let json = br#"{"name": "Lithium", "version": "0.12.1"}"#;

        let result = FabricManifestReader.parse(json).unwrap();

        assert_eq!(result.license, DEFAULT_LICENSE);
        assert!(result.authors.is_empty());
    }

    #[test]
    fn fabric_takes_first_license_from_list() {
        let json = br#"{"name": "X", "version": "1", "license": ["MIT", "Apache-2.0"]}"#;

        let result = FabricManifestReader.parse(json).unwrap();

        assert_eq!(result.license, "MIT");
    }

    #[test]
    fn fabric_rejects_manifest_without_version() {
        let json = br#"{"name": "Broken"}"#;

        assert!(FabricManifestReader.parse(json).is_err());
    }

    #[test]
    fn quilt_reads_metadata_section() {
        let json = br#"{
            "schema_version": 1,
            "quilt_loader": {
                "group": "org.quiltmc",
                "id": "qsl",
                "version": "7.0.0",
                "metadata": {
                    "name": "Quilt Standard Libraries",
                    "license": [{"id": "Apache-2.0", "name": "Apache"}],
                    "contributors": {"Glitch": "Owner", "Haven": "Developer"}
                }
            }
        }"#;

        let result = QuiltManifestReader.parse(json).unwrap();

        assert_eq!(
            result,
            LocalMod::new(
                "Quilt Standard Libraries",
                "7.0.0",
                Loader::Quilt,
                "Apache-2.0",
                vec!["Glitch".to_string(), "Haven".to_string()],
            )
        );
    }

    #[test]
    fn quilt_falls_back_to_id_without_metadata() {
        let json = br#"{"quilt_loader": {"id": "tiny", "version": "1.0"}}"#;

        let result = QuiltManifestReader.parse(json).unwrap();

        assert_eq!(result.name, "tiny");
        assert_eq!(result.license, DEFAULT_LICENSE);
        assert!(result.authors.is_empty());
    }
}
