//! Front-matter parsing from markdown documents.

use super::types::{Frontmatter, FrontmatterValue};

/// Marker line that opens and closes the front-matter block.
pub const DELIMITER: &str = "---";

/// Split a document into its raw front-matter block and body.
///
/// The block is only recognised when the very first line is `---` and a later
/// line is `---` as well:
/// ```markdown
/// ---
/// key: value
/// ---
/// # Document content
/// ```
/// Returns `None` when either marker is missing.
pub fn split(content: &str) -> Option<(&str, &str)> {
    let mut lines = content.split_inclusive('\n');
    let first = lines.next()?;
    if strip_eol(first) != DELIMITER {
        return None;
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        if strip_eol(line) == DELIMITER {
            return Some((&content[start..offset], &content[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// Parse the front-matter of a document.
///
/// Only a restricted `key: value` grammar is understood:
/// - the first `:` separates key and value, both are trimmed
/// - lines without `:` or with an empty key are ignored
/// - single or double quotes around a value are stripped
/// - values starting with `[` or `{` are parsed as JSON, falling back to the
///   raw text when that fails
/// - a key with an empty value followed by `- item` lines becomes a list
///
/// Documents without a complete block yield an empty mapping.
pub fn parse(content: &str) -> Frontmatter {
    split(content).map(|(block, _)| parse_block(block)).unwrap_or_default()
}

fn parse_block(block: &str) -> Frontmatter {
    let mut fm = Frontmatter::new();
    // Key whose value was left empty, plus the list items seen under it so far.
    let mut open: Option<(String, Vec<FrontmatterValue>)> = None;

    for line in block.lines() {
        if let Some(item) = list_item(line)
            && let Some((_, items)) = open.as_mut()
        {
            items.push(FrontmatterValue::String(unquote(item).to_string()));
            continue;
        }

        close_list(&mut fm, open.take());

        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }

        let value = value.trim();
        if value.is_empty() {
            fm.insert(key, FrontmatterValue::String(String::new()));
            open = Some((key.to_string(), Vec::new()));
        } else {
            fm.insert(key, parse_value(value));
        }
    }
    close_list(&mut fm, open);

    fm
}

fn close_list(fm: &mut Frontmatter, open: Option<(String, Vec<FrontmatterValue>)>) {
    if let Some((key, items)) = open
        && !items.is_empty()
    {
        fm.insert(key, FrontmatterValue::List(items));
    }
}

fn parse_value(value: &str) -> FrontmatterValue {
    if let Some(inner) = strip_quotes(value) {
        return FrontmatterValue::String(inner.to_string());
    }

    if value.starts_with('[') || value.starts_with('{') {
        return serde_json::from_str::<serde_json::Value>(value)
            .map(FrontmatterValue::from)
            .unwrap_or_else(|_| FrontmatterValue::String(value.to_string()));
    }

    FrontmatterValue::String(value.to_string())
}

fn list_item(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    if trimmed == "-" {
        return Some("");
    }
    trimmed.strip_prefix("- ").map(str::trim)
}

fn strip_quotes(value: &str) -> Option<&str> {
    value
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
}

fn unquote(value: &str) -> &str {
    strip_quotes(value).unwrap_or(value)
}

fn strip_eol(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}
