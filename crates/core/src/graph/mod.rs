//! Link graph between vault documents.
//!
//! This module provides:
//! - Resolution of raw wiki-link references to document keys
//! - Forward/backward adjacency built in one pass
//! - Orphan detection and bounded-depth connectivity queries

pub mod builder;
pub mod query;
pub mod resolve;

pub use builder::{GraphStats, LinkGraph};
pub use query::{GraphQuery, GraphResult, is_connected, reachable_within};
pub use resolve::LinkResolver;
