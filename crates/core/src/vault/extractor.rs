//! Note content extraction: front-matter, tags, wiki-links.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::frontmatter::{self, Frontmatter, FrontmatterValue};

/// Metadata derived from a document's raw text.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NoteMetadata {
    pub frontmatter: Frontmatter,
    pub tags: BTreeSet<String>,
    /// Raw wiki-link targets in order of appearance, duplicates kept.
    pub links: Vec<String>,
}

// Regex patterns for link and tag extraction
static WIKILINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Matches [[target]] or [[target|alias]]
    // Also handles [[target#section]] and [[target#section|alias]]
    Regex::new(r"\[\[([^\]|]+)(?:\|([^\]]*))?\]\]").unwrap()
});

static INLINE_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    // #tag, #nested/tag, #multi-word_tag; not the fragment in `note#section`
    Regex::new(r"(?:^|[^\w#])#([\w][\w/-]*)").unwrap()
});

/// Extract front-matter, tags and links from document content.
pub fn extract_metadata(content: &str) -> NoteMetadata {
    let frontmatter = frontmatter::parse(content);
    let tags = extract_tags(content, &frontmatter);
    let links = extract_links(content);
    NoteMetadata { frontmatter, tags, links }
}

/// All wiki-link targets, verbatim up to the `|` alias separator.
pub fn extract_links(content: &str) -> Vec<String> {
    WIKILINK_RE
        .captures_iter(content)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Union of the front-matter `tags` field and inline `#tags` anywhere in the text.
pub fn extract_tags(content: &str, fm: &Frontmatter) -> BTreeSet<String> {
    let mut tags = BTreeSet::new();

    match fm.get("tags") {
        Some(FrontmatterValue::List(items)) => {
            tags.extend(items.iter().filter_map(FrontmatterValue::scalar_text).filter_map(
                |t| normalize_tag(&t).map(str::to_string),
            ));
        }
        Some(FrontmatterValue::String(s)) => {
            tags.extend(split_tag_string(s));
        }
        Some(other) => {
            if let Some(t) = other.scalar_text().as_deref().and_then(normalize_tag) {
                tags.insert(t.to_string());
            }
        }
        None => {}
    }

    tags.extend(INLINE_TAG_RE.captures_iter(content).map(|cap| cap[1].to_string()));

    tags
}

/// `work, urgent`, `[work, urgent]` and `#work #urgent` all give two tags.
fn split_tag_string(s: &str) -> impl Iterator<Item = String> + '_ {
    let inner = s.trim();
    let inner = inner
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(inner);

    inner
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter_map(normalize_tag)
        .map(str::to_string)
}

fn normalize_tag(raw: &str) -> Option<&str> {
    let t = raw.trim().trim_matches(|c| c == '"' || c == '\'');
    let t = t.strip_prefix('#').unwrap_or(t);
    (!t.is_empty()).then_some(t)
}
