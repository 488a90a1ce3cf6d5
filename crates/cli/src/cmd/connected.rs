//! Connected command implementation.

use std::path::Path;

use serde::Serialize;

use super::output::{print_json, resolve_format};
use crate::{ConnectedArgs, OutputFormat};

#[derive(Debug, Serialize)]
struct ConnectedOutput<'a> {
    from: &'a str,
    to: &'a str,
    max_depth: usize,
    connected: bool,
}

pub fn run(
    config: Option<&Path>,
    profile: Option<&str>,
    vault: Option<&Path>,
    args: ConnectedArgs,
) {
    let ctx = super::open_vault(config, profile, vault);
    let max_depth = args.depth.unwrap_or(ctx.defaults.max_depth);

    let (from, to) = match (ctx.session.resolve(&args.from), ctx.session.resolve(&args.to)) {
        (Ok(from), Ok(to)) => (from, to),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let connected = match ctx.session.is_connected(from.as_str(), to.as_str(), max_depth) {
        Ok(connected) => connected,
        Err(e) => {
            eprintln!("Error checking connectivity: {}", e);
            std::process::exit(1);
        }
    };

    match resolve_format(&args.out) {
        OutputFormat::Table => {
            let verdict = if connected { "connected" } else { "not connected" };
            println!("{} -> {}: {} (max depth {})", from, to, verdict, max_depth);
        }
        OutputFormat::Json => print_json(&ConnectedOutput {
            from: from.as_str(),
            to: to.as_str(),
            max_depth,
            connected,
        }),
        // Quiet mode reports through the exit status only
        OutputFormat::Quiet => {
            if !connected {
                std::process::exit(1);
            }
        }
    }
}
