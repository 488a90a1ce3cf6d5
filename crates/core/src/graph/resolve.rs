//! Wiki-link target resolution.

use std::collections::HashMap;

use crate::vault::{DocKey, ExclusionRules};

/// Resolves raw link references against a fixed set of document keys.
///
/// Resolution order, first hit wins:
/// 1. a key equal to the reference once the content extension is stripped from both
/// 2. a key equal to the reference with a content extension appended
/// 3. the first key (in enumeration order) ending with `/` + reference + extension
///
/// A `#heading` or `#^block` fragment is ignored, and surrounding whitespace
/// is trimmed, before any of these steps.
#[derive(Debug)]
pub struct LinkResolver<'a> {
    keys: &'a [DocKey],
    rules: &'a ExclusionRules,
    by_bare: HashMap<&'a str, usize>,
    by_key: HashMap<&'a str, usize>,
}

impl<'a> LinkResolver<'a> {
    pub fn new(keys: &'a [DocKey], rules: &'a ExclusionRules) -> Self {
        let mut by_bare = HashMap::with_capacity(keys.len());
        let mut by_key = HashMap::with_capacity(keys.len());
        for (i, key) in keys.iter().enumerate() {
            by_bare.entry(rules.strip_extension(key.as_str())).or_insert(i);
            by_key.entry(key.as_str()).or_insert(i);
        }
        Self { keys, rules, by_bare, by_key }
    }

    pub fn resolve(&self, reference: &str) -> Option<&'a DocKey> {
        let reference = strip_fragment(reference).trim();
        if reference.is_empty() {
            return None;
        }

        if let Some(&i) = self.by_bare.get(self.rules.strip_extension(reference)) {
            return Some(&self.keys[i]);
        }

        let with_ext = self
            .rules
            .extensions
            .iter()
            .filter_map(|ext| self.by_key.get(format!("{reference}.{ext}").as_str()))
            .min();
        if let Some(&i) = with_ext {
            return Some(&self.keys[i]);
        }

        let suffixes: Vec<String> =
            self.rules.extensions.iter().map(|ext| format!("/{reference}.{ext}")).collect();
        self.keys.iter().find(|k| suffixes.iter().any(|suffix| k.as_str().ends_with(suffix)))
    }
}

fn strip_fragment(reference: &str) -> &str {
    reference.split_once('#').map_or(reference, |(target, _)| target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn keys() -> Vec<DocKey> {
        ["B.md", "Notes/Meeting.md", "Projects/x/Plan.md", "Archive/Plan.md", "a.md.md"]
            .into_iter()
            .map(DocKey::new)
            .collect()
    }

    #[rstest]
    #[case("B", Some("B.md"))]
    #[case("B.md", Some("B.md"))]
    #[case("Notes/Meeting", Some("Notes/Meeting.md"))]
    #[case("Meeting", Some("Notes/Meeting.md"))]
    #[case("x/Plan", Some("Projects/x/Plan.md"))]
    #[case("Meeting#Agenda", Some("Notes/Meeting.md"))]
    #[case("Meeting#^block1", Some("Notes/Meeting.md"))]
    #[case(" B ", Some("B.md"))]
    #[case("a.md", Some("a.md.md"))]
    #[case("b", None)]
    #[case("Missing", None)]
    #[case("#Heading", None)]
    #[case("", None)]
    fn resolves_references(#[case] reference: &str, #[case] expected: Option<&str>) {
        let keys = keys();
        let rules = ExclusionRules::default();
        let resolver = LinkResolver::new(&keys, &rules);

        assert_eq!(resolver.resolve(reference).map(DocKey::as_str), expected);
    }

    #[test]
    fn ambiguous_basename_takes_first_in_order() {
        let keys = keys();
        let rules = ExclusionRules::default();
        let resolver = LinkResolver::new(&keys, &rules);

        // Both Projects/x/Plan.md and Archive/Plan.md end with /Plan.md
        assert_eq!(resolver.resolve("Plan").map(DocKey::as_str), Some("Projects/x/Plan.md"));
    }

    #[test]
    fn suffix_match_follows_key_order_across_extensions() {
        let keys: Vec<_> =
            ["a/Plan.txt", "b/Plan.md"].into_iter().map(DocKey::new).collect();
        let rules = ExclusionRules {
            extensions: vec!["md".into(), "txt".into()],
            ..Default::default()
        };
        let resolver = LinkResolver::new(&keys, &rules);

        assert_eq!(resolver.resolve("Plan").map(DocKey::as_str), Some("a/Plan.txt"));
    }

    #[test]
    fn appended_extension_follows_key_order() {
        let keys: Vec<_> = ["n.md.txt", "n.md.md"].into_iter().map(DocKey::new).collect();
        let rules = ExclusionRules {
            extensions: vec!["md".into(), "txt".into()],
            ..Default::default()
        };
        let resolver = LinkResolver::new(&keys, &rules);

        assert_eq!(resolver.resolve("n.md").map(DocKey::as_str), Some("n.md.txt"));
    }

    #[test]
    fn exact_match_beats_suffix_match() {
        let keys: Vec<_> = ["sub/Topic.md", "Topic.md"].into_iter().map(DocKey::new).collect();
        let rules = ExclusionRules::default();
        let resolver = LinkResolver::new(&keys, &rules);

        assert_eq!(resolver.resolve("Topic").map(DocKey::as_str), Some("Topic.md"));
    }
}
