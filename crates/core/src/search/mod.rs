//! Content and fuzzy search over loaded documents.
//!
//! This module provides:
//! - Case-insensitive substring search on a chosen field, in corpus order
//! - Additive fuzzy scoring over file names and content, ranked top-K

pub mod content;
pub mod fuzzy;
pub mod types;

pub use content::search;
pub use fuzzy::{ScoreBreakdown, fuzzy_search, score_document};
pub use types::{
    ContentResult, DEFAULT_CONTEXT_LINES, DEFAULT_MAX_RESULTS, LineMatch, SearchField,
    SearchOptions,
};
