pub mod connected;
pub mod doctor;
pub mod fuzzy;
pub mod graph;
pub mod links;
pub mod orphans;
pub mod output;
pub mod search;

use std::path::Path;

use vaultquery_core::VaultSession;
use vaultquery_core::config::loader::{ConfigError, ConfigLoader};
use vaultquery_core::config::{LoggingConfig, ResolvedConfig, SearchDefaults};

use crate::logging;

/// An opened vault plus the query defaults from config.
pub struct VaultContext {
    pub session: VaultSession,
    pub defaults: SearchDefaults,
}

/// Load config, start logging and open the vault for a query command.
///
/// `--vault` makes the config file optional: when it is missing the vault is
/// opened with default rules and limits. Any other config error is fatal.
pub fn open_vault(
    config: Option<&Path>,
    profile: Option<&str>,
    vault: Option<&Path>,
) -> VaultContext {
    let rc = match ConfigLoader::load(config, profile) {
        Ok(rc) => Some(rc),
        Err(ConfigError::NotFound(_)) if vault.is_some() => None,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    let logging_cfg = rc.as_ref().map(|rc| rc.logging.clone()).unwrap_or_default();
    logging::init(&logging_cfg);

    let root = match (vault, &rc) {
        (Some(vault), _) => vault.to_path_buf(),
        (None, Some(rc)) => rc.vault_root.clone(),
        (None, None) => {
            eprintln!("No vault to query: pass --vault or configure a profile");
            std::process::exit(1);
        }
    };
    if rc.is_none() {
        tracing::debug!("No config file, using default rules for {}", root.display());
    }
    let rules = rc.as_ref().map(ResolvedConfig::exclusion_rules).unwrap_or_default();
    let defaults = rc.as_ref().map(|rc| rc.search).unwrap_or_default();

    match VaultSession::open_with_rules(&root, rules) {
        Ok(session) => VaultContext { session, defaults },
        Err(e) => {
            eprintln!("Error opening vault: {}", e);
            std::process::exit(1);
        }
    }
}

/// Logging setup for commands that run without a vault.
pub fn init_logging(cfg: Option<&LoggingConfig>) {
    logging::init(&cfg.cloned().unwrap_or_default());
}
