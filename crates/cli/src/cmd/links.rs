//! Links command implementation.

use std::path::Path;

use vaultquery_core::vault::DocKey;

use super::output::{print_json, print_paths, resolve_format};
use crate::{LinksArgs, OutputFormat};

pub fn run(
    config: Option<&Path>,
    profile: Option<&str>,
    vault: Option<&Path>,
    args: LinksArgs,
) {
    let ctx = super::open_vault(config, profile, vault);

    let note = match ctx.session.links_of(&args.note) {
        Ok(note) => note,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Hint: use a path relative to the vault root or a note name.");
            std::process::exit(1);
        }
    };

    match resolve_format(&args.out) {
        OutputFormat::Table => {
            println!("=== Outgoing links from {} ===", note.path);
            print_section(&note.outgoing, "outgoing links");
            println!();
            println!("=== Backlinks (notes linking to {}) ===", note.path);
            print_section(&note.incoming, "backlinks");
        }
        OutputFormat::Json => print_json(&note),
        OutputFormat::Quiet => {
            print_paths(note.outgoing.iter().chain(&note.incoming).map(DocKey::as_str))
        }
    }
}

fn print_section(keys: &[DocKey], label: &str) {
    if keys.is_empty() {
        println!("(no {} found)", label);
        return;
    }
    for key in keys {
        println!("  {}", key);
    }
}
