//! Mod archive fixtures

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Writes a zip archive with the given entries into `dir`
pub fn write_archive(dir: &Path, file_name: &str, entries: &[(&str, &str)]) -> PathBuf {
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

/// Writes a Fabric mod jar
pub fn write_fabric_mod(dir: &Path, file_name: &str, name: &str, version: &str, author: &str) -> PathBuf {
    let manifest = serde_json::json!({
        "schemaVersion": 1,
        "id": name.to_lowercase(),
        "name": name,
        "version": version,
        "license": "MIT",
        "authors": [author],
    });
    write_archive(dir, file_name, &[("fabric.mod.json", &manifest.to_string())])
}
