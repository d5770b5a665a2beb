//! Shared test helpers

#![allow(dead_code)]

pub mod archive;
pub mod browser;
pub mod logs;
pub mod registry;

pub use archive::{write_archive, write_fabric_mod};
pub use browser::RecordingBrowser;
pub use logs::CapturedLogs;
pub use registry::{FakeRegistry, download_url};
