//! Search query and result types.

use serde::{Deserialize, Serialize};

use crate::error::{VaultError, VaultResult};
use crate::frontmatter::Frontmatter;
use crate::vault::{DocKey, Document};

pub const DEFAULT_MAX_RESULTS: usize = 20;
pub const DEFAULT_CONTEXT_LINES: usize = 2;

/// Which part of a document a content search looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    /// Document text, line by line.
    #[default]
    Content,
    /// Last path segment, extension included.
    Filename,
    /// Any tag from front-matter or inline.
    Tag,
    /// Any raw wiki-link target.
    Link,
    /// Front-matter serialized as JSON.
    Frontmatter,
}

impl SearchField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Filename => "filename",
            Self::Tag => "tag",
            Self::Link => "link",
            Self::Frontmatter => "frontmatter",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "content" => Some(Self::Content),
            "filename" | "name" => Some(Self::Filename),
            "tag" | "tags" => Some(Self::Tag),
            "link" | "links" => Some(Self::Link),
            "frontmatter" => Some(Self::Frontmatter),
            _ => None,
        }
    }
}

/// Content search parameters.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Text to look for (case-insensitive substring).
    pub query: String,
    /// Stop after this many matching documents.
    pub max_results: usize,
    /// Lines of context kept before and after each matching line.
    pub context_lines: usize,
    /// Field the query is matched against.
    pub field: SearchField,
    /// Attach each matching document's full text.
    pub include_content: bool,
}

impl SearchOptions {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            max_results: DEFAULT_MAX_RESULTS,
            context_lines: DEFAULT_CONTEXT_LINES,
            field: SearchField::default(),
            include_content: false,
        }
    }

    pub fn field(mut self, field: SearchField) -> Self {
        self.field = field;
        self
    }

    pub fn max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn context_lines(mut self, context_lines: usize) -> Self {
        self.context_lines = context_lines;
        self
    }

    pub fn include_content(mut self, include_content: bool) -> Self {
        self.include_content = include_content;
        self
    }
}

/// A matching line and the lines around it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineMatch {
    /// 1-based line number.
    pub line_number: usize,
    pub line: String,
    /// The matching line with its surrounding lines, newline separated.
    pub context: String,
}

/// A document returned by content or fuzzy search.
#[derive(Debug, Clone, Serialize)]
pub struct ContentResult {
    pub path: DocKey,
    pub filename: String,
    pub matches: Vec<LineMatch>,
    /// Relevance; only set by fuzzy search.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    pub frontmatter: Frontmatter,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl ContentResult {
    pub(crate) fn new(doc: &Document, matches: Vec<LineMatch>) -> Self {
        Self {
            path: doc.key.clone(),
            filename: doc.key.file_name().to_string(),
            matches,
            score: None,
            frontmatter: doc.metadata.frontmatter.clone(),
            content: None,
        }
    }
}

/// Reject blank queries and zero caps; returns the lowercased query.
pub(crate) fn normalize_query(query: &str, max_results: usize) -> VaultResult<String> {
    if query.trim().is_empty() {
        return Err(VaultError::InvalidQuery("query must not be empty".to_string()));
    }
    if max_results == 0 {
        return Err(VaultError::InvalidQuery(
            "max results must be at least 1".to_string(),
        ));
    }
    Ok(query.to_lowercase())
}

/// Collect lines accepted by `is_match` (given the lowercased line), each with
/// `context_lines` of context either side, up to `limit` matches.
pub(crate) fn collect_line_matches(
    content: &str,
    context_lines: usize,
    limit: Option<usize>,
    mut is_match: impl FnMut(&str) -> bool,
) -> Vec<LineMatch> {
    let lines: Vec<&str> = content.lines().collect();
    let mut matches = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if limit.is_some_and(|limit| matches.len() >= limit) {
            break;
        }
        if !is_match(&line.to_lowercase()) {
            continue;
        }

        let start = i.saturating_sub(context_lines);
        let end = (i + context_lines).min(lines.len() - 1);
        matches.push(LineMatch {
            line_number: i + 1,
            line: (*line).to_string(),
            context: lines[start..=end].join("\n"),
        });
    }

    matches
}
