//! Documents and their keys.

use std::borrow::Borrow;
use std::fmt;
use std::path::{Component, Path};

use serde::Serialize;

use super::extractor::{NoteMetadata, extract_metadata};

/// Root-relative, forward-slash separated path identifying a document.
///
/// Keys are case-sensitive and order lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DocKey(String);

impl DocKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Build a key from a path relative to the vault root.
    /// Returns `None` for paths that are not valid UTF-8 or leave the root.
    pub fn from_relative(path: &Path) -> Option<Self> {
        let mut parts = Vec::new();
        for component in path.components() {
            match component {
                Component::Normal(part) => parts.push(part.to_str()?),
                Component::CurDir => {}
                _ => return None,
            }
        }
        (!parts.is_empty()).then(|| Self(parts.join("/")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path segments from the root down.
    pub fn segments(&self) -> std::str::Split<'_, char> {
        self.0.split('/')
    }

    /// Last path segment, extension included.
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Last path segment without its extension.
    pub fn file_stem(&self) -> &str {
        let name = self.file_name();
        match name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => name,
        }
    }
}

impl fmt::Display for DocKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for DocKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for DocKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A loaded document with its derived metadata.
#[derive(Debug, Clone)]
pub struct Document {
    pub key: DocKey,
    pub content: String,
    pub metadata: NoteMetadata,
}

impl Document {
    /// Extract metadata from `content`. Never fails.
    pub fn parse(key: DocKey, content: String) -> Self {
        let metadata = extract_metadata(&content);
        Self { key, content, metadata }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn from_relative_joins_with_slashes() {
        let path: PathBuf = ["Notes", "Daily", "2024-01-01.md"].iter().collect();
        let key = DocKey::from_relative(&path).unwrap();
        assert_eq!(key.as_str(), "Notes/Daily/2024-01-01.md");
    }

    #[test]
    fn from_relative_rejects_escaping_paths() {
        assert!(DocKey::from_relative(Path::new("../outside.md")).is_none());
        assert!(DocKey::from_relative(Path::new("/abs/path.md")).is_none());
        assert!(DocKey::from_relative(Path::new("")).is_none());
    }

    #[test]
    fn file_name_and_stem() {
        let key = DocKey::new("Notes/Meeting.md");
        assert_eq!(key.file_name(), "Meeting.md");
        assert_eq!(key.file_stem(), "Meeting");

        let key = DocKey::new("v1.2 notes.md");
        assert_eq!(key.file_stem(), "v1.2 notes");

        let key = DocKey::new(".hidden");
        assert_eq!(key.file_stem(), ".hidden");
    }

    #[test]
    fn keys_order_lexicographically() {
        let mut keys = vec![DocKey::new("b.md"), DocKey::new("A.md"), DocKey::new("a.md")];
        keys.sort();
        assert_eq!(keys, vec![DocKey::new("A.md"), DocKey::new("a.md"), DocKey::new("b.md")]);
    }
}
