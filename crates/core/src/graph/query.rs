//! Structural queries over the link graph: orphans and bounded connectivity.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use serde::Serialize;

use super::builder::LinkGraph;
use crate::frontmatter::Frontmatter;
use crate::vault::{DocKey, Document};

/// Graph query parameters.
#[derive(Debug, Clone, Default)]
pub struct GraphQuery {
    /// Only keep documents connected to this one (resolved like a wiki-link).
    ///
    /// A seed that names no document is an error
    /// ([`VaultError::UnknownDocument`](crate::VaultError::UnknownDocument)),
    /// not an empty result.
    pub seed: Option<String>,
    /// Maximum number of hops from the seed.
    pub max_depth: usize,
    /// Keep documents without any resolved link.
    pub include_orphans: bool,
}

/// A document with its place in the link graph.
#[derive(Debug, Clone, Serialize)]
pub struct GraphResult {
    pub path: DocKey,
    pub outgoing: Vec<DocKey>,
    pub incoming: Vec<DocKey>,
    pub tags: BTreeSet<String>,
    pub frontmatter: Frontmatter,
    /// Hops from the seed, when the query had one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<usize>,
}

impl GraphResult {
    pub(crate) fn new(doc: &Document, graph: &LinkGraph, distance: Option<usize>) -> Self {
        let key = doc.key.as_str();
        Self {
            path: doc.key.clone(),
            outgoing: graph.outgoing(key).cloned().collect(),
            incoming: graph.incoming(key).cloned().collect(),
            tags: doc.metadata.tags.clone(),
            frontmatter: doc.metadata.frontmatter.clone(),
            distance,
        }
    }

    pub fn is_orphan(&self) -> bool {
        self.outgoing.is_empty() && self.incoming.is_empty()
    }
}

/// Whether `b` can be reached from `a` in at most `max_depth` hops, following
/// links in either direction.
pub fn is_connected(graph: &LinkGraph, a: &str, b: &str, max_depth: usize) -> bool {
    if a == b {
        return true;
    }
    if max_depth == 0 {
        return false;
    }

    let mut visited: HashSet<&str> = HashSet::from([a]);
    let mut queue: VecDeque<(&str, usize)> = VecDeque::from([(a, 0)]);

    while let Some((node, depth)) = queue.pop_front() {
        if depth >= max_depth {
            continue;
        }
        for next in graph.neighbours(node) {
            let next = next.as_str();
            if next == b {
                return true;
            }
            if visited.insert(next) {
                queue.push_back((next, depth + 1));
            }
        }
    }

    false
}

/// Every document within `max_depth` hops of `seed` (itself included, at
/// distance 0), following links in either direction.
pub fn reachable_within<'g>(
    graph: &'g LinkGraph,
    seed: &'g DocKey,
    max_depth: usize,
) -> HashMap<&'g DocKey, usize> {
    let mut distances = HashMap::from([(seed, 0)]);
    let mut queue = VecDeque::from([(seed, 0)]);

    while let Some((node, depth)) = queue.pop_front() {
        if depth >= max_depth {
            continue;
        }
        for next in graph.neighbours(node.as_str()) {
            if !distances.contains_key(next) {
                distances.insert(next, depth + 1);
                queue.push_back((next, depth + 1));
            }
        }
    }

    distances
}

/// Run a graph query over a loaded corpus.
///
/// `seed` must already be resolved to a document key. Results keep corpus order.
pub fn run(
    docs: &[Document],
    graph: &LinkGraph,
    seed: Option<&DocKey>,
    query: &GraphQuery,
) -> Vec<GraphResult> {
    let reachable = seed.map(|s| reachable_within(graph, s, query.max_depth));

    docs.iter()
        .filter_map(|doc| {
            let distance = match &reachable {
                Some(reachable) => Some(*reachable.get(&doc.key)?),
                None => None,
            };
            let result = GraphResult::new(doc, graph, distance);
            (query.include_orphans || !result.is_orphan()).then_some(result)
        })
        .collect()
}
