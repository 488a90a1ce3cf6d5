//! A query session over one vault.
//!
//! The session owns the document source and lazily caches the loaded corpus
//! and its link graph. Both live exactly as long as the session (or until
//! [`VaultSession::invalidate`]); nothing is shared between sessions.

use std::cell::OnceCell;
use std::path::Path;

use crate::error::{VaultError, VaultResult};
use crate::graph::{self, GraphQuery, GraphResult, LinkGraph, LinkResolver};
use crate::search::{self, ContentResult, SearchOptions};
use crate::vault::{DocKey, Document, DocumentSource, ExclusionRules, FsSource, Loader};

pub struct VaultSession<S = FsSource> {
    source: S,
    documents: OnceCell<Vec<Document>>,
    graph: OnceCell<LinkGraph>,
}

impl VaultSession<FsSource> {
    /// Open a session on a vault root with the default exclusion rules.
    pub fn open(root: &Path) -> VaultResult<Self> {
        Ok(Self::new(FsSource::open(root)?))
    }

    pub fn open_with_rules(root: &Path, rules: ExclusionRules) -> VaultResult<Self> {
        Ok(Self::new(FsSource::with_rules(root, rules)?))
    }
}

impl<S: DocumentSource> VaultSession<S> {
    pub fn new(source: S) -> Self {
        Self { source, documents: OnceCell::new(), graph: OnceCell::new() }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// All readable documents, in enumeration order. Loaded on first use.
    pub fn documents(&self) -> &[Document] {
        self.documents.get_or_init(|| {
            let docs: Vec<Document> = Loader::new(&self.source).documents().collect();
            tracing::debug!("Loaded {} documents from {}", docs.len(), self.source.describe());
            docs
        })
    }

    /// The link graph of [`Self::documents`]. Built on first use.
    pub fn graph(&self) -> &LinkGraph {
        self.graph.get_or_init(|| LinkGraph::build(self.documents(), self.source.rules()))
    }

    /// Drop cached documents and graph; the next query reloads from the source.
    pub fn invalidate(&mut self) {
        self.documents.take();
        self.graph.take();
    }

    /// Resolve a document reference the same way wiki-links are resolved.
    pub fn resolve(&self, reference: &str) -> VaultResult<DocKey> {
        let keys: Vec<DocKey> = self.documents().iter().map(|d| d.key.clone()).collect();
        LinkResolver::new(&keys, self.source.rules())
            .resolve(reference)
            .cloned()
            .ok_or_else(|| VaultError::UnknownDocument(reference.to_string()))
    }

    /// Content search. Streams from the source unless the corpus is already
    /// loaded, so the scan can stop at the result cap.
    pub fn search(&self, opts: &SearchOptions) -> VaultResult<Vec<ContentResult>> {
        match self.documents.get() {
            Some(docs) => search::search(docs, opts),
            None => search::search(Loader::new(&self.source).documents(), opts),
        }
    }

    pub fn fuzzy_search(
        &self,
        query: &str,
        max_results: usize,
    ) -> VaultResult<Vec<ContentResult>> {
        match self.documents.get() {
            Some(docs) => search::fuzzy_search(docs, query, max_results),
            None => {
                search::fuzzy_search(Loader::new(&self.source).documents(), query, max_results)
            }
        }
    }

    pub fn graph_search(&self, query: &GraphQuery) -> VaultResult<Vec<GraphResult>> {
        let seed = query.seed.as_deref().map(|s| self.resolve(s)).transpose()?;
        Ok(graph::query::run(self.documents(), self.graph(), seed.as_ref(), query))
    }

    /// Whether `b` is within `max_depth` undirected hops of `a`.
    /// Both ends are resolved like wiki-links first.
    pub fn is_connected(&self, a: &str, b: &str, max_depth: usize) -> VaultResult<bool> {
        let a = self.resolve(a)?;
        let b = self.resolve(b)?;
        Ok(graph::is_connected(self.graph(), a.as_str(), b.as_str(), max_depth))
    }

    /// Documents with no resolved link in either direction.
    pub fn orphans(&self) -> Vec<&DocKey> {
        let graph = self.graph();
        self.documents()
            .iter()
            .map(|d| &d.key)
            .filter(|key| graph.is_orphan(key.as_str()))
            .collect()
    }

    /// Outgoing and incoming links of one document.
    pub fn links_of(&self, reference: &str) -> VaultResult<GraphResult> {
        let key = self.resolve(reference)?;
        let doc = self
            .documents()
            .iter()
            .find(|d| d.key == key)
            .ok_or_else(|| VaultError::UnknownDocument(reference.to_string()))?;
        Ok(GraphResult::new(doc, self.graph(), None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::MemorySource;

    fn session() -> VaultSession<MemorySource> {
        let source: MemorySource = [
            ("A.md", "links to [[B]]"),
            ("B.md", "no links"),
            ("C.md", "[[Missing]]"),
            ("Notes/Meeting.md", "---\ntags: [work, urgent]\n---\n#followup with [[A]]"),
        ]
        .into_iter()
        .collect();
        VaultSession::new(source)
    }

    fn paths(results: &[GraphResult]) -> Vec<&str> {
        results.iter().map(|r| r.path.as_str()).collect()
    }

    #[test]
    fn graph_is_built_once() {
        let session = session();
        let first: *const LinkGraph = session.graph();
        let second: *const LinkGraph = session.graph();
        assert_eq!(first, second);
    }

    #[test]
    fn invalidate_reloads_from_source() {
        let mut session = session();
        assert_eq!(session.documents().len(), 4);

        session.source.insert("D.md", "[[C]]");
        assert_eq!(session.documents().len(), 4);

        session.invalidate();
        assert_eq!(session.documents().len(), 5);
        assert!(!session.graph().is_orphan("C.md"));
    }

    #[test]
    fn orphans_and_links() {
        let session = session();
        assert_eq!(session.orphans(), vec![&DocKey::new("C.md")]);

        let links = session.links_of("A").unwrap();
        assert_eq!(links.outgoing, vec![DocKey::new("B.md")]);
        assert_eq!(links.incoming, vec![DocKey::new("Notes/Meeting.md")]);
    }

    #[test]
    fn graph_search_with_seed() {
        let session = session();
        let query =
            GraphQuery { seed: Some("Meeting".into()), max_depth: 1, ..Default::default() };
        assert_eq!(
            paths(&session.graph_search(&query).unwrap()),
            vec!["A.md", "Notes/Meeting.md"]
        );

        let query = GraphQuery { max_depth: 2, ..query };
        assert_eq!(
            paths(&session.graph_search(&query).unwrap()),
            vec!["A.md", "B.md", "Notes/Meeting.md"]
        );
    }

    #[test]
    fn unknown_seed_is_an_error() {
        let session = session();
        let query = GraphQuery { seed: Some("Nope".into()), ..Default::default() };
        assert!(matches!(session.graph_search(&query), Err(VaultError::UnknownDocument(_))));
    }

    #[test]
    fn connectivity_resolves_references() {
        let session = session();
        assert!(session.is_connected("Notes/Meeting.md", "B", 2).unwrap());
        assert!(!session.is_connected("Meeting", "B", 1).unwrap());
        assert!(session.is_connected("C", "C.md", 0).unwrap());
        assert!(session.is_connected("Missing", "A", 3).is_err());
    }

    #[test]
    fn search_works_before_and_after_loading() {
        let session = session();
        let opts = SearchOptions::new("links");
        let streamed = session.search(&opts).unwrap();

        session.documents();
        let cached = session.search(&opts).unwrap();

        assert_eq!(streamed.len(), 2);
        assert_eq!(streamed.len(), cached.len());
        let fuzzy = session.fuzzy_search("meeting", 5).unwrap();
        assert_eq!(fuzzy[0].path.as_str(), "Notes/Meeting.md");
    }
}
