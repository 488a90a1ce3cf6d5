//! Errors surfaced by vault queries.
//!
//! Only failures that abort a whole call live here. Per-document problems
//! (unreadable files, malformed front-matter, dangling links) are absorbed by
//! the loader and extractor and never reach the caller.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("vault root does not exist: {0}")]
    MissingRoot(String),

    #[error("vault root is not a directory: {0}")]
    NotADirectory(String),

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("document not found in vault: {0}")]
    UnknownDocument(String),
}

pub type VaultResult<T> = Result<T, VaultError>;
