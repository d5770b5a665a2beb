//! Run-level error taxonomy
//!
//! Per-mod failures are caught by the orchestrator and reported as warnings;
//! only [`UpdateError::ApiIncompatible`] and [`UpdateError::NoCommonVersion`]
//! end a run.

use thiserror::Error;

use crate::registry::RegistryError;

#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("Request failed: {0}")]
    RequestFailed(#[from] RegistryError),

    #[error("Mod not found: {0}")]
    ModNotFound(String),

    #[error("No compatible version for {slug} ({})", .game_version.as_deref().unwrap_or("any game version"))]
    NoCompatibleVersion {
        slug: String,
        game_version: Option<String>,
    },

    #[error("Version {version_id} of {slug} has no downloadable file")]
    NoDownloadableFile { slug: String, version_id: String },

    #[error("No common version")]
    NoCommonVersion,

    #[error("Incompatible API version {found}, expected {required}x")]
    ApiIncompatible { found: String, required: String },

    #[error("Uncertain match {title} for {name} (affinity {score:.2})")]
    UncertainMatch {
        name: String,
        title: String,
        score: f64,
    },
}
