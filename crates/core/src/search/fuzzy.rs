//! Heuristic fuzzy matching over file names and content.
//!
//! Scoring is additive and deterministic. Each signal is independent:
//!
//! | signal                                   | points |
//! |------------------------------------------|--------|
//! | file stem equals the query               | 100    |
//! | file stem contains the query             | 50     |
//! | every query token appears in the stem    | 30     |
//! | content contains the query               | 20     |
//! | every query token appears in the content | 10     |

use std::borrow::Borrow;

use serde::Serialize;

use super::types::{ContentResult, LineMatch, collect_line_matches, normalize_query};
use crate::error::VaultResult;
use crate::vault::Document;

const NAME_EXACT: u32 = 100;
const NAME_CONTAINS: u32 = 50;
const NAME_TOKENS: u32 = 30;
const CONTENT_CONTAINS: u32 = 20;
const CONTENT_TOKENS: u32 = 10;

/// Snippets attached to a result with a content signal.
const MAX_SNIPPETS: usize = 3;
const SNIPPET_CONTEXT: usize = 1;

/// Which signals fired for one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub name_exact: bool,
    pub name_contains: bool,
    pub name_tokens: bool,
    pub content_contains: bool,
    pub content_tokens: bool,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u32 {
        [
            (self.name_exact, NAME_EXACT),
            (self.name_contains, NAME_CONTAINS),
            (self.name_tokens, NAME_TOKENS),
            (self.content_contains, CONTENT_CONTAINS),
            (self.content_tokens, CONTENT_TOKENS),
        ]
        .into_iter()
        .filter_map(|(fired, points)| fired.then_some(points))
        .sum()
    }

    pub fn has_content_signal(&self) -> bool {
        self.content_contains || self.content_tokens
    }
}

/// Score a document against an already lowercased query.
pub fn score_document(doc: &Document, query: &str) -> ScoreBreakdown {
    let query = query.trim();
    let tokens: Vec<&str> = query.split_whitespace().collect();
    let stem = doc.key.file_stem().to_lowercase();
    let content = doc.content.to_lowercase();

    let all_in = |text: &str| !tokens.is_empty() && tokens.iter().all(|t| text.contains(t));

    ScoreBreakdown {
        name_exact: stem == query,
        name_contains: stem.contains(query),
        name_tokens: all_in(&stem),
        content_contains: content.contains(query),
        content_tokens: all_in(&content),
    }
}

/// Rank documents by fuzzy score and return the best `max_results`.
///
/// Documents scoring 0 are dropped. Ties keep input order.
pub fn fuzzy_search<I, D>(
    docs: I,
    query: &str,
    max_results: usize,
) -> VaultResult<Vec<ContentResult>>
where
    I: IntoIterator<Item = D>,
    D: Borrow<Document>,
{
    let needle = normalize_query(query, max_results)?;
    let needle = needle.trim();

    let mut scored: Vec<(u32, ContentResult)> = docs
        .into_iter()
        .filter_map(|doc| {
            let doc = doc.borrow();
            let breakdown = score_document(doc, needle);
            let total = breakdown.total();
            if total == 0 {
                return None;
            }
            tracing::trace!("{} scored {} for '{}'", doc.key, total, needle);

            let snippets = if breakdown.has_content_signal() {
                snippets(&doc.content, needle, breakdown.content_contains)
            } else {
                Vec::new()
            };
            let mut result = ContentResult::new(doc, snippets);
            result.score = Some(total);
            Some((total, result))
        })
        .collect();

    // `sort_by` is stable, so equal scores stay in enumeration order.
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.truncate(max_results);

    Ok(scored.into_iter().map(|(_, result)| result).collect())
}

fn snippets(content: &str, needle: &str, whole_query: bool) -> Vec<LineMatch> {
    let tokens: Vec<&str> = needle.split_whitespace().collect();
    collect_line_matches(content, SNIPPET_CONTEXT, Some(MAX_SNIPPETS), |line| {
        if whole_query {
            line.contains(needle)
        } else {
            tokens.iter().any(|t| line.contains(t))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::DocKey;
    use rstest::rstest;

    fn doc(key: &str, content: &str) -> Document {
        Document::parse(DocKey::new(key), content.to_string())
    }

    #[rstest]
    #[case("Claude.md", "", "claude", 180)]
    #[case("Claude Notes.md", "", "claude", 80)]
    #[case("Notes on Claude.md", "", "claude notes", 30)]
    #[case("Other.md", "I asked claude once", "claude", 30)]
    #[case("Other.md", "rust is fast and safe", "safe rust", 10)]
    #[case("Claude.md", "about claude", "CLAUDE", 210)]
    #[case("Other.md", "nothing here", "claude", 0)]
    fn scores(
        #[case] key: &str,
        #[case] content: &str,
        #[case] query: &str,
        #[case] expected: u32,
    ) {
        let doc = doc(key, content);
        assert_eq!(score_document(&doc, &query.to_lowercase()).total(), expected);
    }

    #[test]
    fn exact_name_ranks_above_content_only() {
        let docs = vec![doc("Other.md", "Talked to claude today."), doc("Claude.md", "")];
        let results = fuzzy_search(&docs, "claude", 10).unwrap();

        let paths: Vec<_> = results.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["Claude.md", "Other.md"]);
        assert_eq!(results[0].score, Some(180));
        assert_eq!(results[1].score, Some(30));
    }

    #[test]
    fn filename_only_matches_carry_no_snippets() {
        let docs = vec![doc("Claude.md", "unrelated body")];
        let results = fuzzy_search(&docs, "claude", 10).unwrap();
        assert!(results[0].matches.is_empty());
    }

    #[test]
    fn snippets_are_capped_with_one_line_of_context() {
        let body = "intro\nclaude one\nclaude two\nmiddle\nclaude three\nclaude four\nend";
        let docs = vec![doc("Other.md", body)];
        let results = fuzzy_search(&docs, "claude", 10).unwrap();

        let matches = &results[0].matches;
        assert_eq!(matches.len(), MAX_SNIPPETS);
        assert_eq!(matches[0].line_number, 2);
        assert_eq!(matches[0].context, "intro\nclaude one\nclaude two");
        assert_eq!(matches[2].line, "claude three");
    }

    #[test]
    fn token_only_match_snippets_any_token() {
        let docs = vec![doc("Lang.md", "Rust is fast\nand also safe\nfin")];
        let results = fuzzy_search(&docs, "safe rust", 10).unwrap();

        let lines: Vec<_> = results[0].matches.iter().map(|m| m.line.as_str()).collect();
        assert_eq!(lines, vec!["Rust is fast", "and also safe"]);
    }

    #[test]
    fn zero_scores_are_dropped_and_ties_keep_order() {
        let docs = vec![
            doc("b.md", "mentions widget"),
            doc("c.md", "nothing"),
            doc("a.md", "widget again"),
        ];
        let results = fuzzy_search(&docs, "widget", 10).unwrap();

        let paths: Vec<_> = results.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["b.md", "a.md"]);
    }

    #[test]
    fn truncates_to_max_results() {
        let docs: Vec<_> = (0..5).map(|i| doc(&format!("n{i}.md"), "topic")).collect();
        assert_eq!(fuzzy_search(&docs, "topic", 2).unwrap().len(), 2);
    }

    #[test]
    fn rejects_blank_query() {
        let docs = vec![doc("a.md", "")];
        assert!(fuzzy_search(&docs, "   ", 5).is_err());
    }
}
