//! Fuzzy command implementation.

use std::path::Path;

use super::output::{print_json, print_paths, print_results_table, resolve_format};
use crate::{FuzzyArgs, OutputFormat};

pub fn run(config: Option<&Path>, profile: Option<&str>, vault: Option<&Path>, args: FuzzyArgs) {
    let ctx = super::open_vault(config, profile, vault);
    let limit = args.limit.unwrap_or(ctx.defaults.max_results);

    let results = match ctx.session.fuzzy_search(&args.query, limit) {
        Ok(results) => results,
        Err(e) => {
            eprintln!("Error searching: {}", e);
            std::process::exit(1);
        }
    };

    match resolve_format(&args.out) {
        OutputFormat::Table => print_results_table(&results),
        OutputFormat::Json => print_json(&results),
        OutputFormat::Quiet => print_paths(results.iter().map(|r| r.path.as_str())),
    }
}
