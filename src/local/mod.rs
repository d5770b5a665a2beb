//! Local mod reader
//!
//! Turns mod archives on disk into [`LocalMod`] records.
//!
//! # Modules
//!
//! - [`types`]: `LocalMod` and the `Loader` tag
//! - [`manifest`]: per-loader manifest parsers
//! - [`archive`]: archive inspection and directory scanning
//! - [`error`]: archive read errors

pub mod archive;
pub mod error;
pub mod manifest;
pub mod types;

pub use archive::{ModArchiveReader, ScanReport, SkippedArchive};
pub use error::ArchiveError;
pub use manifest::{FabricManifestReader, ManifestReader, QuiltManifestReader};
pub use types::{Loader, LocalMod};
