use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::search::{DEFAULT_CONTEXT_LINES, DEFAULT_MAX_RESULTS};
use crate::vault::ExclusionRules;

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    pub profile: Option<String>,
    pub profiles: HashMap<String, Profile>,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub search: SearchDefaults,
}

#[derive(Debug, Deserialize)]
pub struct Profile {
    pub vault_root: String,
    /// Folders to skip when walking the vault (relative to vault_root).
    #[serde(default)]
    pub excluded_folders: Vec<String>,
    /// Content file extensions, without the dot. Defaults to `["md"]`.
    #[serde(default)]
    pub extensions: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Defaults applied when a query does not set its own limits.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct SearchDefaults {
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_context_lines")]
    pub context_lines: usize,
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            context_lines: default_context_lines(),
            max_depth: default_max_depth(),
        }
    }
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

fn default_context_lines() -> usize {
    DEFAULT_CONTEXT_LINES
}

fn default_max_depth() -> usize {
    2
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub active_profile: String,
    pub vault_root: PathBuf,
    /// Folders to skip when walking the vault (resolved to absolute paths).
    pub excluded_folders: Vec<PathBuf>,
    pub extensions: Vec<String>,
    pub logging: LoggingConfig,
    pub search: SearchDefaults,
}

impl ResolvedConfig {
    /// Exclusion rules for walking this profile's vault.
    pub fn exclusion_rules(&self) -> ExclusionRules {
        let mut rules = ExclusionRules::default()
            .with_excluded_folders(&self.vault_root, self.excluded_folders.iter().cloned());
        if !self.extensions.is_empty() {
            rules.extensions = self.extensions.clone();
        }
        rules
    }
}
