use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

// =============================================================================
// Identity
// =============================================================================

/// Crate version, shown in the banner and the user agent
pub const VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

/// Banner printed before anything else
pub fn banner() -> String {
    format!("UpdateCraft v{VERSION_STRING} by Didas72")
}

// =============================================================================
// Registry
// =============================================================================

/// Modrinth API root, answers the compatibility precheck
pub const DEFAULT_API_CHECK_URL: &str = "https://api.modrinth.com/";

/// Base URL for the versioned Modrinth API
pub const DEFAULT_API_BASE_URL: &str = "https://api.modrinth.com/v2";

/// Major API version the client was written against
pub const DEFAULT_REQUIRED_API_VERSION: &str = "2.";

/// Number of search hits scored per local mod
pub const DEFAULT_SEARCH_LIMIT: u32 = 5;

/// Delay between retry attempts in milliseconds
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

// =============================================================================
// Affinity weights
// =============================================================================

pub const NAME_AFFINITY_WEIGHT: f64 = 5.0;
pub const LICENSE_AFFINITY_WEIGHT: f64 = 1.0;
pub const AUTHOR_AFFINITY_WEIGHT: f64 = 2.0;

/// Floor for the sequence ratio when one string contains the other
pub const SUBSTRING_BASE: f64 = 0.9;

/// Share of the sequence ratio in the string affinity
pub const SEQ_MATCH_WEIGHT: f64 = 0.7;

/// Share of the token overlap in the string affinity
pub const TOK_OVERLAP_WEIGHT: f64 = 0.3;

/// Scores below this are reported as uncertain matches
pub const DEFAULT_UNCERTAIN_BELOW: f64 = 4.0;

// =============================================================================
// Environment
// =============================================================================

/// Environment variables that switch on debug mode (any value)
pub const DEBUG_ENV_VARS: [&str; 2] = ["UPDATECRAFT_DEBUG", "DEBUG"];

/// Environment variable pointing at an explicit config file
pub const CONFIG_ENV_VAR: &str = "UPDATECRAFT_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Run configuration, built once at startup and passed down the pipeline
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub api_base_url: String,
    pub api_check_url: String,
    pub required_api_version: String,
    pub user_agent: String,
    pub search_limit: u32,
    pub retry: RetryConfig,
    pub matching: MatchingConfig,
    pub file_selection: FileSelection,
    /// Wait for Enter after reconciliation (debug mode only)
    pub debug_pause: bool,
    /// Set from the environment, never from the file
    #[serde(skip)]
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_check_url: DEFAULT_API_CHECK_URL.to_string(),
            required_api_version: DEFAULT_REQUIRED_API_VERSION.to_string(),
            user_agent: format!(
                "didas72/UpdateCraft/v{VERSION_STRING} (diogocruzdiniz@gmail.com)"
            ),
            search_limit: DEFAULT_SEARCH_LIMIT,
            retry: RetryConfig::default(),
            matching: MatchingConfig::default(),
            file_selection: FileSelection::default(),
            debug_pause: false,
            debug: false,
        }
    }
}

/// Fixed-count, fixed-delay retry policy for registry requests
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RetryConfig {
    /// Extra attempts after the first failure; zero disables retries
    pub attempts: u32,
    pub delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            attempts: 0,
            delay_ms: DEFAULT_RETRY_DELAY_MS,
        }
    }
}

/// Weights and policy for identifying local mods on the registry
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct MatchingConfig {
    pub name_weight: f64,
    pub license_weight: f64,
    pub author_weight: f64,
    pub uncertain_below: f64,
    /// Drop uncertain matches instead of only warning about them
    pub reject_uncertain: bool,
    /// Local mod name -> registry slug, bypassing search
    pub overrides: HashMap<String, String>,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            name_weight: NAME_AFFINITY_WEIGHT,
            license_weight: LICENSE_AFFINITY_WEIGHT,
            author_weight: AUTHOR_AFFINITY_WEIGHT,
            uncertain_below: DEFAULT_UNCERTAIN_BELOW,
            reject_uncertain: false,
            overrides: HashMap::new(),
        }
    }
}

/// Which file of a published build becomes the download link
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FileSelection {
    /// First listed file, whatever it is
    #[default]
    First,
    /// File flagged as primary, else the first one
    PreferPrimary,
}

impl Config {
    /// Loads the config file (if any) and applies the environment debug flag.
    pub fn load() -> Result<Self, ConfigError> {
        let debug = DEBUG_ENV_VARS
            .iter()
            .any(|name| std::env::var_os(name).is_some());
        let path = config_path_with_env(
            std::env::var(CONFIG_ENV_VAR).ok(),
            std::env::var("XDG_CONFIG_HOME").ok(),
            dirs::home_dir(),
        );
        Self::load_from(path.as_deref(), debug)
    }

    /// Reads `path` when it exists; a missing file yields defaults.
    pub fn load_from(path: Option<&Path>, debug: bool) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) if path.exists() => {
                let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
                serde_json::from_str::<Config>(&content).map_err(|source| ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            _ => Config::default(),
        };
        config.debug = debug;
        Ok(config)
    }
}

/// Resolves the config file location.
/// Uses $UPDATECRAFT_CONFIG if set, then $XDG_CONFIG_HOME/updatecraft/config.json,
/// then ~/.config/updatecraft/config.json.
fn config_path_with_env(
    explicit: Option<String>,
    xdg_config_home: Option<String>,
    home_dir: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(explicit) = explicit {
        return Some(PathBuf::from(explicit));
    }

    xdg_config_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".config")))
        .map(|dir| dir.join("updatecraft").join("config.json"))
}
