//! Graph command implementation.

use std::path::Path;

use vaultquery_core::{GraphQuery, GraphResult};

use super::output::{print_json, print_paths, resolve_format, truncate};
use crate::{GraphArgs, OutputFormat};

pub fn run(
    config: Option<&Path>,
    profile: Option<&str>,
    vault: Option<&Path>,
    args: GraphArgs,
) {
    let ctx = super::open_vault(config, profile, vault);

    let query = GraphQuery {
        seed: args.seed,
        max_depth: args.depth.unwrap_or(ctx.defaults.max_depth),
        include_orphans: args.orphans,
    };

    let results = match ctx.session.graph_search(&query) {
        Ok(results) => results,
        Err(e) => {
            eprintln!("Error querying graph: {}", e);
            std::process::exit(1);
        }
    };

    let stats = ctx.session.graph().stats();
    tracing::debug!(
        "Graph has {} edges, {} unresolved references",
        stats.edges,
        stats.unresolved
    );

    match resolve_format(&args.out) {
        OutputFormat::Table => print_graph_table(&results),
        OutputFormat::Json => print_json(&results),
        OutputFormat::Quiet => print_paths(results.iter().map(|r| r.path.as_str())),
    }
}

fn print_graph_table(results: &[GraphResult]) {
    if results.is_empty() {
        println!("(no notes found)");
        return;
    }

    let path_width =
        results.iter().map(|r| r.path.as_str().len()).max().unwrap_or(4).clamp(4, 50);
    let with_distance = results.iter().any(|r| r.distance.is_some());

    print!("{:<path_width$}  {:>4}  {:>4}", "PATH", "OUT", "IN", path_width = path_width);
    if with_distance {
        print!("  {:>4}", "HOPS");
    }
    println!();

    for result in results {
        print!(
            "{:<path_width$}  {:>4}  {:>4}",
            truncate(result.path.as_str(), path_width),
            result.outgoing.len(),
            result.incoming.len(),
            path_width = path_width,
        );
        if let Some(distance) = result.distance {
            print!("  {:>4}", distance);
        }
        println!();
    }

    println!();
    println!("-- {} notes --", results.len());
}
