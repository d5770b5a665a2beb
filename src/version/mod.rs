//! Game version resolution and reconciliation
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Registry   │────▶│  Resolver   │────▶│  Reconcile  │
//! │  (fetch)    │     │ (per mod)   │     │ (consensus) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │                   │
//!                            ▼                   ▼
//!                     ┌─────────────────────────────┐
//!                     │        GameVersion          │
//!                     │ (stable filter, ordering)   │
//!                     └─────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`game_version`]: stable-release filter and numeric ordering
//! - [`resolver`]: compatible-version listing and build selection per mod
//! - [`reconcile`]: intersection of version sets and the consensus version

pub mod game_version;
pub mod reconcile;
pub mod resolver;

pub use reconcile::{VersionSet, consensus_version, intersect};
pub use resolver::{ChosenVersion, CompatibleVersions, choose_build, list_compatible_versions};
