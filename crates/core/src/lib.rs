//! Search and link-graph queries over a vault of markdown documents.
//!
//! The free functions below open a fresh [`VaultSession`] on `root` and run a
//! single query; use a session directly to run several queries against one
//! load of the vault.

use std::path::Path;

pub mod config;
pub mod error;
pub mod frontmatter;
pub mod graph;
pub mod search;
pub mod session;
pub mod vault;

pub use error::{VaultError, VaultResult};
pub use graph::{GraphQuery, GraphResult};
pub use search::{ContentResult, SearchField, SearchOptions};
pub use session::VaultSession;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Content search over the vault at `root`.
pub fn search(root: &Path, opts: &SearchOptions) -> VaultResult<Vec<ContentResult>> {
    VaultSession::open(root)?.search(opts)
}

/// Fuzzy filename and content match over the vault at `root`.
pub fn fuzzy_search(
    root: &Path,
    query: &str,
    max_results: usize,
) -> VaultResult<Vec<ContentResult>> {
    VaultSession::open(root)?.fuzzy_search(query, max_results)
}

/// Graph query over the vault at `root`.
pub fn graph_search(root: &Path, query: &GraphQuery) -> VaultResult<Vec<GraphResult>> {
    VaultSession::open(root)?.graph_search(query)
}

/// Whether `a` and `b` are linked within `max_depth` hops in the vault at `root`.
pub fn is_connected(root: &Path, a: &str, b: &str, max_depth: usize) -> VaultResult<bool> {
    VaultSession::open(root)?.is_connected(a, b, max_depth)
}
