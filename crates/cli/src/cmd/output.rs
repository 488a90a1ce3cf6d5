//! Shared output formatting for query commands.

use serde::Serialize;
use vaultquery_core::ContentResult;

use crate::{OutputArgs, OutputFormat};

/// `--json` and `--quiet` win over `--output`.
pub fn resolve_format(args: &OutputArgs) -> OutputFormat {
    if args.json {
        OutputFormat::Json
    } else if args.quiet {
        OutputFormat::Quiet
    } else {
        args.output
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

/// Print one path per line (quiet mode).
pub fn print_paths<'a>(paths: impl IntoIterator<Item = &'a str>) {
    for path in paths {
        println!("{}", path);
    }
}

/// Print search results with their matching lines.
pub fn print_results_table(results: &[ContentResult]) {
    if results.is_empty() {
        println!("(no results found)");
        return;
    }

    let scored = results.iter().any(|r| r.score.is_some());
    for result in results {
        match result.score {
            Some(score) if scored => println!("{:>4}  {}", score, result.path),
            _ => println!("{}", result.path),
        }
        for m in &result.matches {
            println!("  {:>4}: {}", m.line_number, truncate(m.line.trim(), 96));
        }
    }

    println!();
    println!("-- {} results --", results.len());
}

/// Truncate string with ellipsis if needed.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len > 3 {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max_len).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer line of text", 10), "a longe...");
        assert_eq!(truncate("héllo wörld", 8), "héllo...");
    }

    #[test]
    fn test_resolve_format() {
        let args = OutputArgs { output: OutputFormat::Table, json: true, quiet: false };
        assert!(matches!(resolve_format(&args), OutputFormat::Json));

        let args = OutputArgs { output: OutputFormat::Json, json: false, quiet: true };
        assert!(matches!(resolve_format(&args), OutputFormat::Quiet));

        let args = OutputArgs { output: OutputFormat::Json, json: false, quiet: false };
        assert!(matches!(resolve_format(&args), OutputFormat::Json));
    }
}
