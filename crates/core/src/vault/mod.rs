//! Vault document discovery and metadata extraction.
//!
//! This module provides utilities for walking vault directories, reading
//! documents from a pluggable source, and extracting front-matter, tags and
//! wiki-links from their text.

pub mod document;
pub mod extractor;
pub mod source;
pub mod walker;

pub use document::{DocKey, Document};
pub use extractor::{NoteMetadata, extract_links, extract_metadata, extract_tags};
pub use source::{DocumentSource, FsSource, Loader, MemorySource};
pub use walker::{ExclusionRules, VaultWalker};
