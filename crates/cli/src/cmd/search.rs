//! Search command implementation.

use std::path::Path;

use vaultquery_core::SearchOptions;

use super::output::{print_json, print_paths, print_results_table, resolve_format};
use crate::{OutputFormat, SearchArgs};

pub fn run(config: Option<&Path>, profile: Option<&str>, vault: Option<&Path>, args: SearchArgs) {
    let ctx = super::open_vault(config, profile, vault);

    let opts = SearchOptions::new(args.query)
        .field(args.field)
        .max_results(args.limit.unwrap_or(ctx.defaults.max_results))
        .context_lines(args.context.unwrap_or(ctx.defaults.context_lines))
        .include_content(args.content);

    let results = match ctx.session.search(&opts) {
        Ok(results) => results,
        Err(e) => {
            eprintln!("Error searching: {}", e);
            std::process::exit(1);
        }
    };
    tracing::debug!("{} results for '{}' in {}", results.len(), opts.query, opts.field.as_str());

    match resolve_format(&args.out) {
        OutputFormat::Table => print_results_table(&results),
        OutputFormat::Json => print_json(&results),
        OutputFormat::Quiet => print_paths(results.iter().map(|r| r.path.as_str())),
    }
}
