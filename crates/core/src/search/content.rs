//! Literal substring search over one document field.

use std::borrow::Borrow;

use super::types::{
    ContentResult, LineMatch, SearchField, SearchOptions, collect_line_matches,
    normalize_query,
};
use crate::error::VaultResult;
use crate::vault::Document;

/// Scan documents in order and return those matching `opts`.
///
/// No ranking is applied: results keep the input order and the scan stops as
/// soon as `max_results` documents have matched.
pub fn search<I, D>(docs: I, opts: &SearchOptions) -> VaultResult<Vec<ContentResult>>
where
    I: IntoIterator<Item = D>,
    D: Borrow<Document>,
{
    let needle = normalize_query(&opts.query, opts.max_results)?;
    let mut results = Vec::new();

    for doc in docs {
        let doc = doc.borrow();
        let Some(matches) = match_field(doc, opts, &needle) else {
            continue;
        };

        let mut result = ContentResult::new(doc, matches);
        if opts.include_content {
            result.content = Some(doc.content.clone());
        }
        results.push(result);

        if results.len() >= opts.max_results {
            break;
        }
    }

    Ok(results)
}

/// `Some(matches)` when the document matches; line records only for the content field.
fn match_field(
    doc: &Document,
    opts: &SearchOptions,
    needle: &str,
) -> Option<Vec<LineMatch>> {
    let contains = |text: &str| text.to_lowercase().contains(needle);

    let matched = match opts.field {
        SearchField::Content => {
            let matches =
                collect_line_matches(&doc.content, opts.context_lines, None, |line| {
                    line.contains(needle)
                });
            return (!matches.is_empty()).then_some(matches);
        }
        SearchField::Filename => contains(doc.key.file_name()),
        SearchField::Tag => doc.metadata.tags.iter().any(|t| contains(t.as_str())),
        SearchField::Link => doc.metadata.links.iter().any(|l| contains(l.as_str())),
        SearchField::Frontmatter => {
            !doc.metadata.frontmatter.is_empty()
                && contains(doc.metadata.frontmatter.to_json().as_str())
        }
    };

    matched.then(Vec::new)
}
