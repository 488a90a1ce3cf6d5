//! Orphans command implementation.

use std::path::Path;

use super::output::{print_json, print_paths, resolve_format};
use crate::{OutputArgs, OutputFormat};

pub fn run(
    config: Option<&Path>,
    profile: Option<&str>,
    vault: Option<&Path>,
    args: OutputArgs,
) {
    let ctx = super::open_vault(config, profile, vault);
    let orphans = ctx.session.orphans();

    match resolve_format(&args) {
        OutputFormat::Table => {
            if orphans.is_empty() {
                println!("(no orphans found)");
                return;
            }
            for key in &orphans {
                println!("{}", key);
            }
            println!();
            println!("-- {} orphans --", orphans.len());
        }
        OutputFormat::Json => print_json(&orphans),
        OutputFormat::Quiet => print_paths(orphans.iter().map(|k| k.as_str())),
    }
}
