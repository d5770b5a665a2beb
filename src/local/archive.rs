//! Mod archive inspection and directory scanning

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use zip::ZipArchive;
use zip::result::ZipError;

use crate::local::error::ArchiveError;
use crate::local::manifest::{FabricManifestReader, ManifestReader, QuiltManifestReader};
use crate::local::types::LocalMod;

/// Extension of mod archives picked up by a directory scan
const MOD_EXTENSION: &str = "jar";

/// An archive left out of the scan, with the reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedArchive {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of scanning a mod directory, in file-name order
#[derive(Debug, Default)]
pub struct ScanReport {
    pub mods: Vec<LocalMod>,
    pub skipped: Vec<SkippedArchive>,
}

/// Reads mod archives with an ordered list of manifest readers
pub struct ModArchiveReader {
    readers: Vec<Box<dyn ManifestReader>>,
}

impl Default for ModArchiveReader {
    fn default() -> Self {
        Self::new(vec![
            Box::new(FabricManifestReader),
            Box::new(QuiltManifestReader),
        ])
    }
}

impl ModArchiveReader {
    /// Earlier readers win when an archive carries several manifests.
    pub fn new(readers: Vec<Box<dyn ManifestReader>>) -> Self {
        Self { readers }
    }

    /// Reads a single archive.
    ///
    /// Returns `Ok(None)` when no reader recognises the archive.
    pub fn read(&self, path: &Path) -> Result<Option<LocalMod>, ArchiveError> {
        let file = File::open(path).map_err(|source| ArchiveError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut archive = ZipArchive::new(file)?;

        for reader in &self.readers {
            let entry_name = reader.entry_name();
            let mut entry = match archive.by_name(entry_name) {
                Ok(entry) => entry,
                Err(ZipError::FileNotFound) => continue,
                Err(e) => return Err(e.into()),
            };

            let mut bytes = Vec::new();
            entry
                .read_to_end(&mut bytes)
                .map_err(|source| ArchiveError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;

            let local = reader
                .parse(&bytes)
                .map_err(|source| ArchiveError::Manifest {
                    entry: entry_name,
                    source,
                })?;
            debug!(
                "Read {} mod {} ({}) from {:?}",
                local.loader, local.name, local.version, path
            );
            return Ok(Some(local));
        }

        Ok(None)
    }

    /// Scans `dir` for mod archives.
    ///
    /// Unrecognised or unreadable archives are logged and skipped; only a
    /// failure to list the directory itself is an error.
    pub fn scan_directory(&self, dir: &Path) -> Result<ScanReport, ArchiveError> {
        let mut paths = list_mod_archives(dir)?;
        paths.sort();

        let mut report = ScanReport::default();
        for path in paths {
            let file_name = display_name(&path);
            match self.read(&path) {
                Ok(Some(local)) => report.mods.push(local),
                Ok(None) => {
                    warn!("Unrecognized jar {}. Skipping...", file_name);
                    report.skipped.push(SkippedArchive {
                        path,
                        reason: "no recognized mod manifest".to_string(),
                    });
                }
                Err(e) => {
                    warn!("Unreadable jar {}: {}. Skipping...", file_name, e);
                    report.skipped.push(SkippedArchive {
                        path,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }
}

fn list_mod_archives(dir: &Path) -> Result<Vec<PathBuf>, ArchiveError> {
    let io_error = |source: std::io::Error| ArchiveError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        let is_jar = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(MOD_EXTENSION));
        if is_jar && path.is_file() {
            paths.push(path);
        }
    }
    Ok(paths)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local::types::Loader;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn write_archive(dir: &Path, file_name: &str, entries: &[(&str, &str)]) -> PathBuf {
        let path = dir.join(file_name);
        let mut writer = ZipWriter::new(File::create(&path).unwrap());
        for (name, content) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
        path
    }

    #[test]
    fn read_returns_fabric_mod() {
        let dir = TempDir::new().unwrap();
        let path = write_archive(
            dir.path(),
            "sodium.jar",
            &[(
                "fabric.mod.json",
                r#"{"name": "Sodium", "version": "0.5.8", "authors": ["JellySquid"]}"#,
            )],
        );

        let result = ModArchiveReader::default().read(&path).unwrap().unwrap();

        assert_eq!(result.name, "Sodium");
        assert_eq!(result.loader, Loader::Fabric);
        assert_eq!(result.authors, vec!["JellySquid".to_string()]);
    }

    #[test]
    fn read_prefers_fabric_manifest_over_quilt() {
        let dir = TempDir::new().unwrap();
        let path = write_archive(
            dir.path(),
            "both.jar",
            &[
                (
                    "quilt.mod.json",
                    r#"{"quilt_loader": {"id": "both", "version": "2.0"}}"#,
                ),
                ("fabric.mod.json", r#"{"name": "Both", "version": "1.0"}"#),
            ],
        );

        let result = ModArchiveReader::default().read(&path).unwrap().unwrap();

        assert_eq!(result.loader, Loader::Fabric);
        assert_eq!(result.version, "1.0");
    }

    #[test]
    fn read_returns_none_without_manifest() {
        let dir = TempDir::new().unwrap();
        let path = write_archive(dir.path(), "library.jar", &[("META-INF/MANIFEST.MF", "")]);

        let result = ModArchiveReader::default().read(&path).unwrap();

        assert_eq!(result, None);
    }

    #[test]
    fn read_reports_malformed_manifest() {
        let dir = TempDir::new().unwrap();
        let path = write_archive(dir.path(), "broken.jar", &[("fabric.mod.json", "{")]);

        let result = ModArchiveReader::default().read(&path);

        assert!(matches!(
            result,
            Err(ArchiveError::Manifest {
                entry: "fabric.mod.json",
                ..
            })
        ));
    }

    #[test]
    fn scan_directory_keeps_file_name_order_and_skips_unrecognized() {
        let dir = TempDir::new().unwrap();
        write_archive(
            dir.path(),
            "b-lithium.jar",
            &[("fabric.mod.json", r#"{"name": "Lithium", "version": "2"}"#)],
        );
        write_archive(
            dir.path(),
            "a-sodium.JAR",
            &[("fabric.mod.json", r#"{"name": "Sodium", "version": "1"}"#)],
        );
        write_archive(dir.path(), "c-plain.jar", &[("readme.txt", "hi")]);
        std::fs::write(dir.path().join("notes.txt"), "not a mod").unwrap();
        std::fs::write(dir.path().join("d-garbage.jar"), "not a zip").unwrap();

        let report = ModArchiveReader::default()
            .scan_directory(dir.path())
            .unwrap();

        let names: Vec<&str> = report.mods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Sodium", "Lithium"]);
        let skipped: Vec<String> = report.skipped.iter().map(|s| display_name(&s.path)).collect();
        assert_eq!(skipped, vec!["c-plain.jar", "d-garbage.jar"]);
    }

    #[test]
    fn scan_directory_fails_for_missing_directory() {
        let dir = TempDir::new().unwrap();

        let result = ModArchiveReader::default().scan_directory(&dir.path().join("missing"));

        assert!(matches!(result, Err(ArchiveError::Io { .. })));
    }
}
