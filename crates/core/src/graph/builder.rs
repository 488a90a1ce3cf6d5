//! Link graph construction.

use std::collections::{BTreeMap, BTreeSet};

use super::resolve::LinkResolver;
use crate::vault::{DocKey, Document, ExclusionRules};

/// Statistics from a graph build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphStats {
    /// Number of documents in the graph.
    pub documents: usize,
    /// Link references seen, duplicates included.
    pub references: usize,
    /// Distinct resolved edges.
    pub edges: usize,
    /// References that matched no document.
    pub unresolved: usize,
}

/// Forward and backward adjacency between documents.
///
/// Every document of the corpus has an entry in both maps, possibly empty.
/// `backward` is always the transpose of `forward`.
#[derive(Debug, Clone, Default)]
pub struct LinkGraph {
    forward: BTreeMap<DocKey, BTreeSet<DocKey>>,
    backward: BTreeMap<DocKey, BTreeSet<DocKey>>,
    stats: GraphStats,
}

impl LinkGraph {
    /// Build the graph for a corpus in a single pass.
    pub fn build(docs: &[Document], rules: &ExclusionRules) -> Self {
        let keys: Vec<DocKey> = docs.iter().map(|d| d.key.clone()).collect();
        let resolver = LinkResolver::new(&keys, rules);

        let mut graph = LinkGraph {
            forward: keys.iter().map(|k| (k.clone(), BTreeSet::new())).collect(),
            backward: keys.iter().map(|k| (k.clone(), BTreeSet::new())).collect(),
            stats: GraphStats { documents: keys.len(), ..Default::default() },
        };

        for doc in docs {
            for reference in &doc.metadata.links {
                graph.stats.references += 1;
                match resolver.resolve(reference) {
                    Some(target) => {
                        tracing::trace!("{} -> {} ({})", doc.key, target, reference);
                        graph.add_edge(&doc.key, target);
                    }
                    None => graph.stats.unresolved += 1,
                }
            }
        }

        tracing::debug!(
            "Built link graph: {} documents, {} references, {} edges, {} unresolved",
            graph.stats.documents,
            graph.stats.references,
            graph.stats.edges,
            graph.stats.unresolved
        );

        graph
    }

    fn add_edge(&mut self, source: &DocKey, target: &DocKey) {
        let inserted =
            self.forward.entry(source.clone()).or_default().insert(target.clone());
        if inserted {
            self.backward.entry(target.clone()).or_default().insert(source.clone());
            self.stats.edges += 1;
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.forward.contains_key(key)
    }

    /// Resolved targets of `key`'s links.
    pub fn outgoing(&self, key: &str) -> impl Iterator<Item = &DocKey> {
        self.forward.get(key).into_iter().flatten()
    }

    /// Documents linking to `key`.
    pub fn incoming(&self, key: &str) -> impl Iterator<Item = &DocKey> {
        self.backward.get(key).into_iter().flatten()
    }

    /// Outgoing and incoming neighbours, treating edges as undirected.
    pub fn neighbours(&self, key: &str) -> impl Iterator<Item = &DocKey> {
        self.outgoing(key).chain(self.incoming(key))
    }

    /// A document with no resolved link in either direction.
    pub fn is_orphan(&self, key: &str) -> bool {
        self.outgoing(key).next().is_none() && self.incoming(key).next().is_none()
    }

    pub fn keys(&self) -> impl Iterator<Item = &DocKey> {
        self.forward.keys()
    }

    pub fn stats(&self) -> GraphStats {
        self.stats
    }
}
