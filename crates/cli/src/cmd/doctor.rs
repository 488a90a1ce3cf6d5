use std::path::Path;

use vaultquery_core::VaultSession;
use vaultquery_core::config::loader::{ConfigLoader, default_config_path};

pub fn run(config: Option<&Path>, profile: Option<&str>) {
    match ConfigLoader::load(config, profile) {
        Ok(rc) => {
            super::init_logging(Some(&rc.logging));
            tracing::debug!("Checking vault {}", rc.vault_root.display());

            println!("OK   vq doctor");
            println!(
                "path: {}",
                config.map_or_else(
                    || default_config_path().display().to_string(),
                    |p| p.display().to_string()
                )
            );
            println!("profile: {}", rc.active_profile);
            println!("vault_root: {}", rc.vault_root.display());

            let excluded: Vec<String> =
                rc.excluded_folders.iter().map(|p| p.display().to_string()).collect();
            if excluded.is_empty() {
                println!("excluded_folders: (none)");
            } else {
                println!("excluded_folders: {}", excluded.join(", "));
            }
            println!("extensions: {}", rc.exclusion_rules().extensions.join(", "));
            println!("search.max_results: {}", rc.search.max_results);
            println!("search.context_lines: {}", rc.search.context_lines);
            println!("search.max_depth: {}", rc.search.max_depth);
            println!("logging.level: {}", rc.logging.level);

            match VaultSession::open_with_rules(&rc.vault_root, rc.exclusion_rules()) {
                Ok(session) => {
                    let stats = session.graph().stats();
                    println!("documents: {}", stats.documents);
                    println!("links: {} resolved, {} unresolved", stats.edges, stats.unresolved);
                    println!("orphans: {}", session.orphans().len());
                }
                Err(e) => println!("documents: unavailable ({e})"),
            }
        }
        Err(e) => {
            println!("FAIL vq doctor");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    }
}
