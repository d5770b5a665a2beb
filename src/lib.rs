//! Finds the newest game version every local mod supports and suggests
//! matching downloads from the Modrinth registry.
//!
//! # Modules
//!
//! - [`app`]: pipeline orchestration and the user-facing report
//! - [`local`]: reading mod archives from disk
//! - [`matcher`]: affinity matching of local mods to registry projects
//! - [`registry`]: registry trait and the Modrinth client
//! - [`version`]: compatible versions, consensus and build selection
//! - [`browser`], [`prompt`]: interactive edges
//! - [`config`], [`logging`], [`error`]: shared configuration, diagnostics and errors

pub mod app;
pub mod browser;
pub mod config;
pub mod error;
pub mod local;
pub mod logging;
pub mod matcher;
pub mod prompt;
pub mod registry;
pub mod version;
